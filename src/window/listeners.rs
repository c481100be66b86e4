//! Pointer listener registrations owned by decorated surfaces.
//!
//! Decorating a surface registers its focus, drag and resize listeners and
//! returns a [`DecorationHandle`]. Pointer routing only reaches listeners that
//! are live: closing a surface disposes all of them through the handle,
//! showing it again re-attaches them, and window states switch single kinds
//! off (a maximized window neither drags nor resizes).

use bitflags::bitflags;

/// Handle returned when a surface is decorated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecorationHandle(u64);

impl DecorationHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

bitflags! {
    /// Pointer listener kinds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Listener: u8 {
        /// Raise on any press.
        const FOCUS = 0b001;
        /// Title-bar dragging.
        const DRAG = 0b010;
        /// Handle resizing.
        const RESIZE = 0b100;
    }
}

#[derive(Clone, Debug)]
struct Registration {
    handle: DecorationHandle,
    surface: String,
    /// Kinds the surface currently accepts.
    enabled: Listener,
    /// False once disposed.
    attached: bool,
}

impl Registration {
    fn live(&self) -> Listener {
        if self.attached {
            self.enabled
        } else {
            Listener::empty()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    next: u64,
    entries: Vec<Registration>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every listener for `surface`.
    pub fn register(&mut self, surface: &str) -> DecorationHandle {
        self.next += 1;
        let handle = DecorationHandle(self.next);
        self.entries.push(Registration {
            handle,
            surface: surface.to_string(),
            enabled: Listener::all(),
            attached: true,
        });
        handle
    }

    /// Detach the listeners behind `handle`. Returns how many were detached.
    pub fn dispose(&mut self, handle: DecorationHandle) -> usize {
        match self.entry_mut(handle) {
            Some(reg) if reg.attached => {
                let detached = reg.live().bits().count_ones() as usize;
                reg.attached = false;
                detached
            }
            _ => 0,
        }
    }

    /// Re-attach listeners disposed by [`Self::dispose`].
    pub fn reattach(&mut self, handle: DecorationHandle) -> bool {
        match self.entry_mut(handle) {
            Some(reg) if !reg.attached => {
                reg.attached = true;
                true
            }
            _ => false,
        }
    }

    /// Accept exactly the `kinds` listeners for `handle`. A disposed
    /// registration keeps the setting for when it is re-attached.
    pub fn enable_only(&mut self, handle: DecorationHandle, kinds: Listener) {
        if let Some(reg) = self.entry_mut(handle) {
            reg.enabled = kinds;
        }
    }

    #[must_use]
    pub fn has(&self, surface: &str, listener: Listener) -> bool {
        self.entries
            .iter()
            .any(|r| r.surface == surface && r.live().contains(listener))
    }

    /// Number of live listeners across all surfaces.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries
            .iter()
            .map(|r| r.live().bits().count_ones() as usize)
            .sum()
    }

    fn entry_mut(&mut self, handle: DecorationHandle) -> Option<&mut Registration> {
        self.entries.iter_mut().find(|r| r.handle == handle)
    }
}
