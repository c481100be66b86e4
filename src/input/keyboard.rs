//! Key presses and the desk commands they map to.

use bitflags::bitflags;

use crate::page::ids;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT = 0b0000_0010;
        const CTRL = 0b0000_0100;
    }
}

/// Keys the desk distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Up,
    Down,
    PageUp,
    PageDown,
    Backspace,
    Tab,
}

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }
}

/// What a key asks the desk to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Activate the control with this id.
    Click(&'static str),
    /// Scroll the portfolio by this many lines.
    Scroll(i32),
}

impl Command {
    /// Key bindings: `q` or Ctrl-C quit, `s` skips, `p` or space pauses,
    /// `1`/`2` reopen the terminal and portfolio, `3` opens the gif window,
    /// arrows and page keys scroll the portfolio.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.ctrl() {
            return match key.code {
                KeyCode::Char('c' | 'd') => Some(Self::Quit),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('s' | 'S') => Some(Self::Click(ids::SKIP)),
            KeyCode::Char('p' | 'P' | ' ') => Some(Self::Click(ids::PAUSE)),
            KeyCode::Char('1') => Some(Self::Click(ids::REOPEN_TERMINAL)),
            KeyCode::Char('2') => Some(Self::Click(ids::REOPEN_PORTFOLIO)),
            KeyCode::Char('3') => Some(Self::Click(ids::OPEN_GIF)),
            KeyCode::Up => Some(Self::Scroll(-1)),
            KeyCode::Down => Some(Self::Scroll(1)),
            KeyCode::PageUp => Some(Self::Scroll(-10)),
            KeyCode::PageDown => Some(Self::Scroll(10)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(Command::from_key(&KeyEvent::char('q')), Some(Command::Quit));
        assert_eq!(
            Command::from_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CTRL)),
            Some(Command::Quit)
        );
        assert_eq!(
            Command::from_key(&KeyEvent::char(' ')),
            Some(Command::Click(ids::PAUSE))
        );
        assert_eq!(
            Command::from_key(&KeyEvent::char('3')),
            Some(Command::Click(ids::OPEN_GIF))
        );
        assert_eq!(
            Command::from_key(&KeyEvent::key(KeyCode::PageDown)),
            Some(Command::Scroll(10))
        );
        assert_eq!(Command::from_key(&KeyEvent::char('x')), None);
        assert_eq!(
            Command::from_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CTRL)),
            None
        );
    }
}
