//! Viewport clamping for drag and resize.

use crate::config::WindowMetrics;
use crate::geometry::{Rect, Viewport};
use crate::window::edges::ResizeDirection;

/// Position for a surface dragged by `(dx, dy)` from `start`.
///
/// At least `visible_margin` of the surface stays inside the viewport
/// horizontally; the top edge stays between the top of the viewport and
/// `margin` above the dock.
#[must_use]
pub fn drag_to(start: Rect, dx: i32, dy: i32, metrics: &WindowMetrics, viewport: &Viewport) -> Rect {
    let margin = metrics.visible_margin;
    let min_left = margin - start.width;
    let max_left = viewport.width - margin;
    let max_top = (viewport.usable_height() - margin).max(0);

    let left = start.left.saturating_add(dx).min(max_left).max(min_left);
    let top = start.top.saturating_add(dy).min(max_top).max(0);
    Rect::new(left, top, start.width, start.height)
}

/// Geometry for a surface resized from `start` through the handle `dir`.
///
/// Width and height never drop below the minimum; when they would, the edge
/// opposite the dragged one stays pinned. The result is then fitted into the
/// viewport above the dock.
#[must_use]
pub fn resize_to(
    start: Rect,
    dir: ResizeDirection,
    dx: i32,
    dy: i32,
    metrics: &WindowMetrics,
    viewport: &Viewport,
) -> Rect {
    let min_w = metrics.min_width;
    let min_h = metrics.min_height;
    let Rect {
        mut left,
        mut top,
        mut width,
        mut height,
    } = start;

    if dir.contains(ResizeDirection::EAST) {
        width = start.width.saturating_add(dx);
    }
    if dir.contains(ResizeDirection::WEST) {
        width = start.width.saturating_sub(dx);
        left = start.left.saturating_add(dx);
    }
    if dir.contains(ResizeDirection::SOUTH) {
        height = start.height.saturating_add(dy);
    }
    if dir.contains(ResizeDirection::NORTH) {
        height = start.height.saturating_sub(dy);
        top = start.top.saturating_add(dy);
    }

    if width < min_w {
        width = min_w;
        if dir.contains(ResizeDirection::WEST) {
            left = start.right() - min_w;
        }
    }
    if height < min_h {
        height = min_h;
        if dir.contains(ResizeDirection::NORTH) {
            top = start.bottom() - min_h;
        }
    }

    // Growing past the top-left corner of the viewport gives up the overflow.
    if dir.contains(ResizeDirection::WEST) && left < 0 {
        width = width.saturating_add(left).max(min_w);
        left = 0;
    }
    if dir.contains(ResizeDirection::NORTH) && top < 0 {
        height = height.saturating_add(top).max(min_h);
        top = 0;
    }

    let usable = viewport.usable_height();
    width = width.min((viewport.width - left).max(min_w));
    height = height.min((usable - top).max(min_h));
    left = left.min((viewport.width - width).max(0)).max(0);
    top = top.min((usable - height).max(0)).max(0);

    Rect::new(left, top, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px() -> (WindowMetrics, Viewport) {
        (WindowMetrics::default(), Viewport::new(1280, 800, 80))
    }

    #[test]
    fn test_drag_moves_by_delta() {
        let (m, vp) = px();
        let r = drag_to(Rect::new(100, 100, 400, 300), 50, -20, &m, &vp);
        assert_eq!(r, Rect::new(150, 80, 400, 300));
    }

    #[test]
    fn test_drag_keeps_margin_visible() {
        let (m, vp) = px();
        let start = Rect::new(100, 100, 400, 300);
        let left = drag_to(start, -100_000, 0, &m, &vp);
        assert_eq!(left.right(), 40);
        let right = drag_to(start, 100_000, 0, &m, &vp);
        assert_eq!(right.left, 1240);
        let down = drag_to(start, 0, 100_000, &m, &vp);
        assert_eq!(down.top, 800 - 80 - 40);
        let up = drag_to(start, 0, -100_000, &m, &vp);
        assert_eq!(up.top, 0);
    }

    #[test]
    fn test_resize_east_south() {
        let (m, vp) = px();
        let r = resize_to(
            Rect::new(100, 100, 400, 300),
            ResizeDirection::SOUTH_EAST,
            30,
            40,
            &m,
            &vp,
        );
        assert_eq!(r, Rect::new(100, 100, 430, 340));
    }

    #[test]
    fn test_resize_west_below_minimum_pins_right_edge() {
        let (m, vp) = px();
        let start = Rect::new(300, 100, 400, 300);
        let r = resize_to(start, ResizeDirection::WEST, 350, 0, &m, &vp);
        assert_eq!(r.width, 200);
        assert_eq!(r.right(), start.right());
    }

    #[test]
    fn test_resize_north_below_minimum_pins_bottom_edge() {
        let (m, vp) = px();
        let start = Rect::new(300, 100, 400, 300);
        let r = resize_to(start, ResizeDirection::NORTH_WEST, 0, 1000, &m, &vp);
        assert_eq!(r.height, 150);
        assert_eq!(r.bottom(), start.bottom());
        assert_eq!(r.left, 300);
    }

    #[test]
    fn test_resize_east_below_minimum_keeps_left() {
        let (m, vp) = px();
        let r = resize_to(
            Rect::new(300, 100, 400, 300),
            ResizeDirection::EAST,
            -1000,
            0,
            &m,
            &vp,
        );
        assert_eq!(r, Rect::new(300, 100, 200, 300));
    }

    #[test]
    fn test_resize_clamps_to_viewport() {
        let (m, vp) = px();
        let r = resize_to(
            Rect::new(1000, 500, 200, 150),
            ResizeDirection::SOUTH_EAST,
            5000,
            5000,
            &m,
            &vp,
        );
        assert_eq!(r.right(), 1280);
        assert_eq!(r.bottom(), 720);

        let r = resize_to(
            Rect::new(50, 50, 300, 300),
            ResizeDirection::NORTH_WEST,
            -500,
            -500,
            &m,
            &vp,
        );
        assert_eq!((r.left, r.top), (0, 0));
        assert_eq!((r.right(), r.bottom()), (350, 350));
    }
}
