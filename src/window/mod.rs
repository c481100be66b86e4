//! Window management for decorated surfaces.
//!
//! The [`WindowManager`] decorates surfaces with a title bar, controls and
//! eight resize handles, routes pointer presses to them, keeps them inside
//! the viewport while dragging or resizing, and stacks them with a bounded
//! z-order counter.

mod clamp;
mod edges;
mod listeners;
mod manager;
mod surface;
mod zorder;

pub use clamp::{drag_to, resize_to};
pub use edges::ResizeDirection;
pub use listeners::{DecorationHandle, Listener, ListenerRegistry};
pub use manager::{FrameUpdate, Hit, WindowManager};
pub use surface::{ChromePart, ControlButton, SurfacePart, WindowState, WindowSurface};
pub use zorder::ZOrder;
