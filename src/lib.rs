//! `typedesk` - a portfolio page that types itself
//!
//! The desk types its own stylesheet into a terminal-like surface, applies
//! each rule as it lands, types a Markdown portfolio into a second surface
//! and renders it, then turns both into draggable, resizable windows with
//! title-bar controls.
//!
//! The core is host-agnostic: [`Page`] is driven by a virtual clock
//! ([`Page::advance`]) and pointer calls, so it runs the same under tests and
//! the terminal frontend in `src/bin/typedesk.rs`.
//!
//! # Example
//!
//! ```
//! use typedesk::{DeskOptions, Page};
//!
//! let mut page = Page::standard(DeskOptions::default(), 1280, 800).unwrap();
//! page.start();
//! page.complete_instantly();
//! page.run_until_idle(64);
//! assert!(page.is_done());
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for placement fractions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow WindowManager in window etc
#![allow(clippy::struct_excessive_bools)] // Terminal state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod page;
pub mod renderer;
pub mod schedule;
pub mod terminal;
pub mod typewriter;
pub mod window;

// Re-export core types at crate root
pub use color::Rgb;
pub use config::{DeskOptions, PauseMode, WindowMetrics, ZLimits};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use geometry::{Point, Rect, Viewport};

// Re-export input types
pub use input::{Command, Event, InputParser, KeyCode, KeyEvent, KeyModifiers, PointerEvent};

// Re-export the desk
pub use page::{Document, Page};
pub use typewriter::{AnimationPhase, Session, StyleSheet, Typewriter};
pub use window::{ControlButton, WindowManager, WindowState};

// Re-export the terminal frontend
pub use renderer::{Canvas, RenderStats, Renderer, RendererOptions};
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
