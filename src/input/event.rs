//! Decoded terminal input.

use crate::geometry::Point;
use crate::input::keyboard::KeyEvent;

/// Mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// No button held (plain motion).
    None,
}

/// What the pointer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Release,
    /// Motion with a button held.
    Drag,
    /// Motion with no button held.
    Move,
    /// Wheel motion in lines; negative scrolls up.
    Wheel(i32),
}

/// A pointer event in zero-based cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: u32,
    pub y: u32,
    pub button: MouseButton,
    pub kind: PointerKind,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: u32, y: u32, button: MouseButton, kind: PointerKind) -> Self {
        Self { x, y, button, kind }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(
            i32::try_from(self.x).unwrap_or(i32::MAX),
            i32::try_from(self.y).unwrap_or(i32::MAX),
        )
    }

    /// A left-button press.
    #[must_use]
    pub fn is_primary_press(&self) -> bool {
        self.kind == PointerKind::Press && self.button == MouseButton::Left
    }
}

/// A terminal input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Pointer(PointerEvent),
    /// A well-formed sequence the desk has no use for.
    Ignored,
}

impl From<KeyEvent> for Event {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}

impl From<PointerEvent> for Event {
    fn from(pointer: PointerEvent) -> Self {
        Self::Pointer(pointer)
    }
}

impl Event {
    #[must_use]
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(e) => Some(e),
            _ => None,
        }
    }
}
