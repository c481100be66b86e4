//! Terminal session for the desk frontend.
//!
//! [`Terminal`] switches the terminal into the state the desk needs
//! (alternate screen, hidden cursor, SGR mouse tracking, raw input) and puts
//! everything back when dropped.

mod raw;

pub use raw::{
    RawModeGuard, enable_raw_mode, is_tty, poll_readable, read_available, terminal_size,
};

use std::io::{self, Write};

use bitflags::bitflags;
use tracing::debug;

use crate::ansi::sequences;

bitflags! {
    /// Terminal modes the session has switched on.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modes: u8 {
        const ALT_SCREEN = 0b001;
        const MOUSE = 0b010;
        const CURSOR_HIDDEN = 0b100;
    }
}

impl Modes {
    /// Sequences that switch `self` (a single mode) on and off.
    fn sequences(self) -> (&'static str, &'static str) {
        if self == Self::ALT_SCREEN {
            (sequences::ALT_SCREEN_ON, sequences::ALT_SCREEN_OFF)
        } else if self == Self::MOUSE {
            (sequences::MOUSE_ON, sequences::MOUSE_OFF)
        } else {
            (sequences::CURSOR_HIDE, sequences::CURSOR_SHOW)
        }
    }
}

/// Terminal state manager.
pub struct Terminal<W: Write> {
    writer: W,
    modes: Modes,
    raw_mode_guard: Option<RawModeGuard>,
}

impl<W: Write> Terminal<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            modes: Modes::empty(),
            raw_mode_guard: None,
        }
    }

    /// Enter raw mode, the alternate screen and mouse tracking, and hide
    /// the cursor.
    pub fn enter(&mut self) -> io::Result<()> {
        self.enter_raw_mode()?;
        self.set_mode(Modes::ALT_SCREEN, true)?;
        self.set_mode(Modes::CURSOR_HIDDEN, true)?;
        self.set_mode(Modes::MOUSE, true)?;
        debug!(modes = ?self.modes, "terminal session entered");
        self.flush()
    }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    #[must_use]
    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        Ok(())
    }

    pub fn exit_raw_mode(&mut self) {
        self.raw_mode_guard = None;
    }

    /// Switch one mode on or off. Writes nothing when it is already in that
    /// state.
    pub fn set_mode(&mut self, mode: Modes, on: bool) -> io::Result<()> {
        if self.modes.contains(mode) == on {
            return Ok(());
        }
        let (enable, disable) = mode.sequences();
        self.writer
            .write_all(if on { enable } else { disable }.as_bytes())?;
        self.modes.set(mode, on);
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        write!(
            self.writer,
            "{}{title}{}",
            sequences::TITLE_PREFIX,
            sequences::TITLE_SUFFIX
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Undo everything [`Self::enter`] did, mouse first.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.set_mode(Modes::MOUSE, false)?;
        self.set_mode(Modes::CURSOR_HIDDEN, false)?;
        self.set_mode(Modes::ALT_SCREEN, false)?;
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.exit_raw_mode();
        self.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
