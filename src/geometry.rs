//! Points, rectangles and the viewport.
//!
//! All coordinates are signed: surfaces may be dragged partly off-screen to
//! the left, so the left edge is allowed to go negative.

/// A pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to `self`.
    #[must_use]
    pub const fn delta_from(self, origin: Point) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Check if a point is inside this rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.y >= self.top && p.x < self.right() && p.y < self.bottom()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Compute intersection with another rectangle.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.left.max(other.left);
        let y1 = self.top.max(other.top);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }
}

/// The visible area surfaces live in.
///
/// The bottom `dock_height` units are reserved for the dock; surfaces are
/// kept above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub dock_height: i32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: i32, height: i32, dock_height: i32) -> Self {
        Self {
            width,
            height,
            dock_height,
        }
    }

    /// Height available to surfaces (viewport minus the dock).
    #[must_use]
    pub fn usable_height(&self) -> i32 {
        (self.height - self.dock_height).max(0)
    }

    /// The area a maximized surface occupies.
    #[must_use]
    pub fn work_area(&self) -> Rect {
        Rect::new(0, 0, self.width.max(0), self.usable_height())
    }

    /// A rectangle placed at fractions of the viewport.
    #[must_use]
    pub fn place(&self, left_frac: f32, top_frac: f32, width: i32, height: i32) -> Rect {
        let left = (self.width as f32 * left_frac).round() as i32;
        let top = (self.height as f32 * top_frac).round() as i32;
        Rect::new(left, top, width, height)
    }
}
