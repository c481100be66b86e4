//! Pause and skip state shared between controls and the engine.

use std::cell::Cell;
use std::rc::Rc;

/// Cooperative pause flag. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct PauseFlag(Rc<Cell<bool>>);

impl PauseFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, paused: bool) {
        self.0.set(paused);
    }

    /// Flip the flag, returning the new state.
    pub fn toggle(&self) -> bool {
        let paused = !self.0.get();
        self.0.set(paused);
        paused
    }
}

/// One-way skip request for a whole run. Cloning shares the token.
///
/// Once cancelled it stays cancelled; there is no resume.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Per-run controls: the pause flag and the skip token.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub pause: PauseFlag,
    pub skip: CancellationToken,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    #[must_use]
    pub fn skip_requested(&self) -> bool {
        self.skip.is_cancelled()
    }
}
