//! The window manager: decoration, pointer routing, stacking.

use tracing::{debug, info};

use crate::config::{DeskOptions, WindowMetrics, ZLimits};
use crate::event::{emit_event, names};
use crate::geometry::{Point, Rect, Viewport};
use crate::schedule::FrameSlot;
use crate::window::clamp::{drag_to, resize_to};
use crate::window::edges::ResizeDirection;
use crate::window::listeners::{DecorationHandle, Listener, ListenerRegistry};
use crate::window::surface::{ControlButton, SurfacePart, WindowState, WindowSurface};
use crate::window::zorder::ZOrder;

/// A pointer press resolved to a surface region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub surface: String,
    pub part: SurfacePart,
}

/// Geometry queued for the next animation frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameUpdate {
    pub surface: String,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gesture {
    Drag,
    Resize(ResizeDirection),
}

#[derive(Clone, Debug)]
struct Interaction {
    surface: String,
    gesture: Gesture,
    start_pointer: Point,
    start_rect: Rect,
}

/// Owns every decorated surface and routes pointer input to them.
#[derive(Debug)]
pub struct WindowManager {
    metrics: WindowMetrics,
    viewport: Viewport,
    /// Decorated surfaces in document order.
    surfaces: Vec<WindowSurface>,
    handles: Vec<(String, DecorationHandle)>,
    zorder: ZOrder,
    listeners: ListenerRegistry,
    interaction: Option<Interaction>,
    frame: FrameSlot<FrameUpdate>,
}

impl WindowManager {
    #[must_use]
    pub fn new(metrics: WindowMetrics, z: ZLimits, viewport: Viewport) -> Self {
        Self {
            metrics,
            viewport,
            surfaces: Vec::new(),
            handles: Vec::new(),
            zorder: ZOrder::new(z),
            listeners: ListenerRegistry::new(),
            interaction: None,
            frame: FrameSlot::new(),
        }
    }

    /// Manager for `viewport`, with the dock height taken from the options.
    #[must_use]
    pub fn from_options(options: &DeskOptions, width: i32, height: i32) -> Self {
        let viewport = Viewport::new(width, height, options.metrics.dock_height);
        Self::new(options.metrics, options.z, viewport)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn metrics(&self) -> &WindowMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn zorder(&self) -> &ZOrder {
        &self.zorder
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    #[must_use]
    pub fn surfaces(&self) -> &[WindowSurface] {
        &self.surfaces
    }

    #[must_use]
    pub fn surface(&self, id: &str) -> Option<&WindowSurface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    fn surface_mut(&mut self, id: &str) -> Option<&mut WindowSurface> {
        self.surfaces.iter_mut().find(|s| s.id == id)
    }

    #[must_use]
    pub fn is_decorated(&self, id: &str) -> bool {
        self.surface(id).is_some()
    }

    #[must_use]
    pub fn handle(&self, id: &str) -> Option<DecorationHandle> {
        self.handles.iter().find(|(s, _)| s == id).map(|(_, h)| *h)
    }

    /// Decorate a surface at its current layout position.
    ///
    /// Returns `None` when the surface already carries controls.
    pub fn decorate(&mut self, id: &str, rect: Rect) -> Option<DecorationHandle> {
        if self.is_decorated(id) {
            return None;
        }
        self.surfaces.push(WindowSurface::new(id, rect));
        let handle = self.listeners.register(id);
        self.handles.push((id.to_string(), handle));
        debug!(surface = id, ?rect, "decorated");
        emit_event(names::WINDOW_DECORATED, id);
        Some(handle)
    }

    /// Visible surfaces, bottom to top.
    #[must_use]
    pub fn stacking(&self) -> Vec<&WindowSurface> {
        let mut visible: Vec<(usize, &WindowSurface)> = self
            .surfaces
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.hidden)
            .collect();
        visible.sort_by_key(|(i, s)| (s.z, *i));
        visible.into_iter().map(|(_, s)| s).collect()
    }

    /// Top-most interactive surface region under `p`.
    #[must_use]
    pub fn hit_test(&self, p: Point) -> Option<Hit> {
        self.stacking()
            .into_iter()
            .rev()
            .filter(|s| self.listeners.has(&s.id, Listener::FOCUS))
            .find_map(|s| {
                s.part_at(p, &self.metrics, &self.viewport).map(|part| Hit {
                    surface: s.id.clone(),
                    part,
                })
            })
    }

    /// Raise a surface above every other one.
    ///
    /// Renumbers all surfaces first when the counter would pass its ceiling.
    pub fn bring_to_front(&mut self, id: &str) -> Option<i32> {
        if !self.is_decorated(id) {
            return None;
        }
        if self.zorder.would_overflow() {
            let count = self
                .zorder
                .renumber(self.surfaces.iter_mut().map(|s| &mut s.z));
            info!(count, base = self.zorder.limits().base, "z-order renumbered");
            emit_event(names::ZORDER_RENUMBERED, &count.to_string());
        }
        let z = self.zorder.advance();
        let surface = self.surface_mut(id)?;
        surface.z = z;
        emit_event(names::WINDOW_RAISED, id);
        Some(z)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(
            self.interaction,
            Some(Interaction {
                gesture: Gesture::Drag,
                ..
            })
        )
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(
            self.interaction,
            Some(Interaction {
                gesture: Gesture::Resize(_),
                ..
            })
        )
    }

    /// Start dragging `id` from pointer position `p`.
    pub fn begin_drag(&mut self, id: &str, p: Point) -> bool {
        if !self.listeners.has(id, Listener::DRAG) {
            return false;
        }
        let Some(surface) = self.surface(id) else {
            return false;
        };
        if surface.hidden {
            return false;
        }
        self.interaction = Some(Interaction {
            surface: id.to_string(),
            gesture: Gesture::Drag,
            start_pointer: p,
            start_rect: surface.rect,
        });
        true
    }

    /// Start resizing `id` through the handle `dir`. No-op while minimized or
    /// maximized.
    pub fn begin_resize(&mut self, id: &str, dir: ResizeDirection, p: Point) -> bool {
        if !self.listeners.has(id, Listener::RESIZE) {
            return false;
        }
        let Some(surface) = self.surface(id) else {
            return false;
        };
        if surface.hidden {
            return false;
        }
        self.interaction = Some(Interaction {
            surface: id.to_string(),
            gesture: Gesture::Resize(dir),
            start_pointer: p,
            start_rect: surface.rect,
        });
        true
    }

    /// Route a pointer press: raise the surface under it, then start a drag,
    /// a resize, or press a control depending on the region.
    pub fn pointer_down(&mut self, p: Point) -> Option<Hit> {
        let hit = self.hit_test(p)?;
        match hit.part {
            SurfacePart::TitleBar => {
                self.begin_drag(&hit.surface, p);
            }
            SurfacePart::Handle(dir) => {
                self.begin_resize(&hit.surface, dir, p);
            }
            SurfacePart::Control(button) => {
                self.press_control(&hit.surface, button);
            }
            SurfacePart::Body => {}
        }
        if !matches!(hit.part, SurfacePart::Control(ControlButton::Close)) {
            self.bring_to_front(&hit.surface);
        }
        Some(hit)
    }

    /// Queue the geometry for the pointer at `p`. Returns whether an update
    /// was requested.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(interaction) = &self.interaction else {
            return false;
        };
        let (dx, dy) = p.delta_from(interaction.start_pointer);
        let rect = match interaction.gesture {
            Gesture::Drag => drag_to(
                interaction.start_rect,
                dx,
                dy,
                &self.metrics,
                &self.viewport,
            ),
            Gesture::Resize(dir) => resize_to(
                interaction.start_rect,
                dir,
                dx,
                dy,
                &self.metrics,
                &self.viewport,
            ),
        };
        self.frame.request(FrameUpdate {
            surface: interaction.surface.clone(),
            rect,
        });
        true
    }

    /// End any drag or resize and drop the frame not yet drawn.
    pub fn pointer_up(&mut self) {
        if self.interaction.take().is_some() {
            self.frame.cancel();
        }
    }

    /// Apply the pending update, if any.
    pub fn animation_frame(&mut self) -> Option<FrameUpdate> {
        let update = self.frame.fire()?;
        let surface = self.surface_mut(&update.surface)?;
        surface.rect = update.rect;
        Some(update)
    }

    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    pub fn press_control(&mut self, id: &str, button: ControlButton) {
        match button {
            ControlButton::Close => {
                self.close(id);
            }
            ControlButton::Minimize => {
                self.toggle_minimize(id);
            }
            ControlButton::Maximize => {
                self.toggle_maximize(id);
            }
        }
    }

    pub fn toggle_minimize(&mut self, id: &str) -> Option<WindowState> {
        self.toggle_state(id, WindowState::Minimized)
    }

    pub fn toggle_maximize(&mut self, id: &str) -> Option<WindowState> {
        self.toggle_state(id, WindowState::Maximized)
    }

    fn toggle_state(&mut self, id: &str, target: WindowState) -> Option<WindowState> {
        self.end_interaction_on(id);
        let surface = self.surface_mut(id)?;
        surface.state = if surface.state == target {
            WindowState::Normal
        } else {
            target
        };
        let state = surface.state;
        if let Some(handle) = self.handle(id) {
            self.listeners.enable_only(handle, state.listeners());
        }
        debug!(surface = id, ?state, "state toggled");
        Some(state)
    }

    /// Hide a surface and detach its pointer listeners.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(handle) = self.handle(id) else {
            return false;
        };
        self.end_interaction_on(id);
        let detached = self.listeners.dispose(handle);
        if let Some(surface) = self.surface_mut(id) {
            surface.hidden = true;
        }
        debug!(surface = id, detached, "closed");
        emit_event(names::WINDOW_CLOSED, id);
        true
    }

    /// Show a closed surface again, re-attaching its listeners.
    pub fn show(&mut self, id: &str) -> bool {
        let Some(handle) = self.handle(id) else {
            return false;
        };
        self.listeners.reattach(handle);
        match self.surface_mut(id) {
            Some(surface) => {
                surface.hidden = false;
                true
            }
            None => false,
        }
    }

    fn end_interaction_on(&mut self, id: &str) {
        if self.interaction.as_ref().is_some_and(|i| i.surface == id) {
            self.interaction = None;
            self.frame.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::surface::ChromePart;

    fn manager() -> WindowManager {
        WindowManager::new(
            WindowMetrics::default(),
            ZLimits::default(),
            Viewport::new(1280, 800, 80),
        )
    }

    #[test]
    fn test_decorate_is_idempotent() {
        let mut wm = manager();
        assert!(wm.decorate("a", Rect::new(10, 10, 400, 300)).is_some());
        assert!(wm.decorate("a", Rect::new(99, 99, 1, 1)).is_none());
        assert_eq!(wm.surfaces().len(), 1);
        let s = wm.surface("a").unwrap();
        assert_eq!(s.rect(), Rect::new(10, 10, 400, 300));
        assert_eq!(s.count_chrome(|p| *p == ChromePart::TitleBar), 1);
        assert_eq!(s.count_chrome(|p| matches!(p, ChromePart::Handle(_))), 8);
        assert_eq!(wm.listeners().live_count(), 3);
    }

    #[test]
    fn test_drag_is_coalesced_per_frame() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        let hit = wm.pointer_down(Point::new(300, 115)).unwrap();
        assert_eq!(hit.part, SurfacePart::TitleBar);
        assert!(wm.is_dragging());

        wm.pointer_move(Point::new(310, 120));
        wm.pointer_move(Point::new(320, 125));
        assert_eq!(wm.surface("a").unwrap().rect().left, 100);
        let update = wm.animation_frame().unwrap();
        assert_eq!(update.rect, Rect::new(120, 110, 400, 300));
        assert!(wm.animation_frame().is_none());
    }

    #[test]
    fn test_pointer_up_cancels_pending_frame() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        wm.pointer_down(Point::new(300, 115));
        wm.pointer_move(Point::new(500, 300));
        wm.pointer_up();
        assert!(!wm.is_dragging());
        assert!(wm.animation_frame().is_none());
        assert_eq!(wm.surface("a").unwrap().rect().left, 100);
    }

    #[test]
    fn test_resize_from_handle() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        let hit = wm.pointer_down(Point::new(499, 399)).unwrap();
        assert_eq!(hit.part, SurfacePart::Handle(ResizeDirection::SOUTH_EAST));
        assert!(wm.is_resizing());
        wm.pointer_move(Point::new(519, 429));
        wm.animation_frame();
        assert_eq!(wm.surface("a").unwrap().rect(), Rect::new(100, 100, 420, 330));
    }

    #[test]
    fn test_resize_refused_while_minimized_or_maximized() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        wm.toggle_maximize("a");
        assert!(!wm.begin_resize("a", ResizeDirection::EAST, Point::new(0, 0)));
        assert!(!wm.begin_drag("a", Point::new(0, 0)));
        wm.toggle_minimize("a");
        assert_eq!(wm.surface("a").unwrap().state(), WindowState::Minimized);
        assert!(!wm.begin_resize("a", ResizeDirection::EAST, Point::new(0, 0)));
        assert!(wm.begin_drag("a", Point::new(0, 0)));
    }

    #[test]
    fn test_window_state_switches_listener_kinds() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        assert_eq!(wm.listeners().live_count(), 3);

        wm.toggle_maximize("a");
        assert!(wm.listeners().has("a", Listener::FOCUS));
        assert!(!wm.listeners().has("a", Listener::DRAG));
        assert_eq!(wm.listeners().live_count(), 1);

        // closing a maximized window detaches what is left, and reopening
        // restores the maximized set
        assert!(wm.close("a"));
        assert_eq!(wm.listeners().live_count(), 0);
        assert!(wm.show("a"));
        assert_eq!(wm.listeners().live_count(), 1);

        wm.toggle_minimize("a");
        assert!(wm.listeners().has("a", Listener::DRAG));
        assert!(!wm.listeners().has("a", Listener::RESIZE));

        wm.toggle_minimize("a");
        assert_eq!(wm.listeners().live_count(), 3);
        assert!(wm.begin_resize("a", ResizeDirection::EAST, Point::new(0, 0)));
    }

    #[test]
    fn test_minimize_and_maximize_exclude_each_other() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(0, 0, 400, 300));
        assert_eq!(wm.toggle_minimize("a"), Some(WindowState::Minimized));
        assert_eq!(wm.toggle_maximize("a"), Some(WindowState::Maximized));
        assert_eq!(wm.toggle_maximize("a"), Some(WindowState::Normal));
        assert_eq!(wm.toggle_minimize("a"), Some(WindowState::Minimized));
        assert_eq!(wm.toggle_minimize("a"), Some(WindowState::Normal));
    }

    #[test]
    fn test_raise_on_press_and_stacking() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(0, 0, 400, 300));
        wm.decorate("b", Rect::new(100, 100, 400, 300));
        wm.bring_to_front("a");
        wm.bring_to_front("b");
        // overlap region belongs to b until a is pressed
        assert_eq!(wm.hit_test(Point::new(200, 200)).unwrap().surface, "b");
        wm.pointer_down(Point::new(50, 200));
        assert_eq!(wm.hit_test(Point::new(200, 200)).unwrap().surface, "a");
        let order: Vec<_> = wm.stacking().iter().map(|s| s.id().to_string()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_close_detaches_and_show_reattaches() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        let close = wm.surface("a").unwrap().control_rect(
            ControlButton::Close,
            wm.metrics(),
            &wm.viewport(),
        );
        let hit = wm.pointer_down(close.origin()).unwrap();
        assert_eq!(hit.part, SurfacePart::Control(ControlButton::Close));
        assert!(wm.surface("a").unwrap().is_hidden());
        assert_eq!(wm.listeners().live_count(), 0);
        assert!(wm.hit_test(Point::new(300, 200)).is_none());
        assert!(!wm.begin_drag("a", Point::new(0, 0)));

        assert!(wm.show("a"));
        assert_eq!(wm.listeners().live_count(), 3);
        assert!(wm.hit_test(Point::new(300, 200)).is_some());
    }

    #[test]
    fn test_close_mid_drag_drops_interaction() {
        let mut wm = manager();
        wm.decorate("a", Rect::new(100, 100, 400, 300));
        wm.pointer_down(Point::new(300, 115));
        wm.pointer_move(Point::new(400, 115));
        wm.close("a");
        assert!(!wm.is_dragging());
        assert!(!wm.frame_pending());
        assert!(!wm.pointer_move(Point::new(500, 115)));
    }

    #[test]
    fn test_renumber_at_ceiling() {
        let mut wm = WindowManager::new(
            WindowMetrics::default(),
            ZLimits {
                base: 1000,
                ceiling: 1005,
            },
            Viewport::new(1280, 800, 80),
        );
        for id in ["a", "b", "c"] {
            wm.decorate(id, Rect::new(0, 0, 300, 200));
        }
        for id in ["a", "b", "c", "a", "b"] {
            wm.bring_to_front(id);
        }
        assert_eq!(wm.zorder().current(), 1005);
        let z = wm.bring_to_front("c").unwrap();
        let zs: Vec<_> = wm.surfaces().iter().map(WindowSurface::z).collect();
        assert_eq!(zs, vec![1000, 1001, z]);
        assert_eq!(z, 1004);
    }

    #[test]
    fn test_undecorated_surface_is_not_raised() {
        let mut wm = manager();
        assert_eq!(wm.bring_to_front("ghost"), None);
        assert!(!wm.close("ghost"));
        assert!(!wm.show("ghost"));
    }
}
