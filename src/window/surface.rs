//! Decorated surfaces and their chrome.

use crate::config::WindowMetrics;
use crate::geometry::{Point, Rect, Viewport};
use crate::window::edges::ResizeDirection;
use crate::window::listeners::Listener;

/// Window state. Minimized and maximized are exclusive by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl WindowState {
    /// Pointer listeners a surface in this state accepts.
    #[must_use]
    pub fn listeners(self) -> Listener {
        match self {
            Self::Normal => Listener::all(),
            Self::Minimized => Listener::FOCUS | Listener::DRAG,
            Self::Maximized => Listener::FOCUS,
        }
    }

    /// Marker class carried by surfaces in this state.
    #[must_use]
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Minimized => Some("minimized"),
            Self::Maximized => Some("maximized"),
        }
    }
}

/// Title-bar control buttons, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Close,
    Minimize,
    Maximize,
}

impl ControlButton {
    pub const ALL: [Self; 3] = [Self::Close, Self::Minimize, Self::Maximize];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Close => "Close",
            Self::Minimize => "Minimize",
            Self::Maximize => "Maximize",
        }
    }
}

/// Pieces inserted into a surface when it is decorated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChromePart {
    TitleBar,
    Controls,
    Handle(ResizeDirection),
}

/// Region of a surface under a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfacePart {
    TitleBar,
    Control(ControlButton),
    Handle(ResizeDirection),
    Body,
}

/// A decorated, movable and resizable surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSurface {
    pub(crate) id: String,
    pub(crate) rect: Rect,
    pub(crate) z: i32,
    pub(crate) state: WindowState,
    pub(crate) hidden: bool,
    pub(crate) chrome: Vec<ChromePart>,
}

impl WindowSurface {
    pub(crate) fn new(id: &str, rect: Rect) -> Self {
        let mut chrome = vec![ChromePart::TitleBar, ChromePart::Controls];
        chrome.extend(ResizeDirection::HANDLES.map(ChromePart::Handle));
        Self {
            id: id.to_string(),
            rect,
            z: 0,
            state: WindowState::Normal,
            hidden: false,
            chrome,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Explicit position and size (ignoring minimize/maximize).
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn z(&self) -> i32 {
        self.z
    }

    #[must_use]
    pub fn state(&self) -> WindowState {
        self.state
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn chrome(&self) -> &[ChromePart] {
        &self.chrome
    }

    /// Count chrome parts matching `pred`.
    #[must_use]
    pub fn count_chrome(&self, pred: impl Fn(&ChromePart) -> bool) -> usize {
        self.chrome.iter().filter(|p| pred(p)).count()
    }

    /// Area the surface occupies on screen in its current state.
    #[must_use]
    pub fn frame(&self, metrics: &WindowMetrics, viewport: &Viewport) -> Rect {
        match self.state {
            WindowState::Normal => self.rect,
            WindowState::Minimized => Rect::new(
                self.rect.left,
                self.rect.top,
                self.rect.width,
                metrics.title_height.min(self.rect.height).max(1),
            ),
            WindowState::Maximized => viewport.work_area(),
        }
    }

    /// The draggable title band.
    ///
    /// When the bar is taller than a handle, the top handle strip is left to
    /// the north handle.
    #[must_use]
    pub fn title_rect(&self, metrics: &WindowMetrics, viewport: &Viewport) -> Rect {
        let frame = self.frame(metrics, viewport);
        let t = metrics.handle_thickness;
        if metrics.title_height > t {
            Rect::new(frame.left, frame.top + t, frame.width, metrics.title_height - t)
        } else {
            Rect::new(frame.left, frame.top, frame.width, metrics.title_height)
        }
    }

    #[must_use]
    pub fn control_rect(
        &self,
        button: ControlButton,
        metrics: &WindowMetrics,
        viewport: &Viewport,
    ) -> Rect {
        let title = self.title_rect(metrics, viewport);
        let index = ControlButton::ALL
            .iter()
            .position(|b| *b == button)
            .unwrap_or_default() as i32;
        Rect::new(
            title.left + metrics.handle_thickness + index * metrics.button_width,
            title.top,
            metrics.button_width,
            title.height,
        )
    }

    /// Region of the surface under `p`, if any.
    ///
    /// Controls win over corners, corners over the title bar, the title bar
    /// over edges.
    #[must_use]
    pub fn part_at(&self, p: Point, metrics: &WindowMetrics, viewport: &Viewport) -> Option<SurfacePart> {
        let frame = self.frame(metrics, viewport);
        if !frame.contains(p) {
            return None;
        }
        for button in ControlButton::ALL {
            if self.control_rect(button, metrics, viewport).contains(p) {
                return Some(SurfacePart::Control(button));
            }
        }

        let t = metrics.handle_thickness;
        let mut edges = ResizeDirection::empty();
        if p.y < frame.top + t {
            edges |= ResizeDirection::NORTH;
        }
        if p.y >= frame.bottom() - t {
            edges |= ResizeDirection::SOUTH;
        }
        if p.x < frame.left + t {
            edges |= ResizeDirection::WEST;
        }
        if p.x >= frame.right() - t {
            edges |= ResizeDirection::EAST;
        }
        if edges.is_corner() && ResizeDirection::HANDLES.contains(&edges) {
            return Some(SurfacePart::Handle(edges));
        }
        if self.title_rect(metrics, viewport).contains(p) {
            return Some(SurfacePart::TitleBar);
        }
        if ResizeDirection::HANDLES.contains(&edges) {
            return Some(SurfacePart::Handle(edges));
        }
        Some(SurfacePart::Body)
    }
}
