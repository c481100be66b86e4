//! Terminal input for the desk.
//!
//! Raw bytes are decoded into key presses and SGR pointer events; keys map
//! to desk [`Command`]s.

mod event;
mod keyboard;
mod parser;

pub use event::{Event, MouseButton, PointerEvent, PointerKind};
pub use keyboard::{Command, KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError, ParseResult, WHEEL_LINES};
