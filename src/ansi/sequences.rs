//! Fixed escape sequences for the terminal session.

/// SGR reset.
pub const RESET: &str = "\x1b[0m";

pub const CLEAR_SCREEN: &str = "\x1b[2J";

pub const CURSOR_HIDE: &str = "\x1b[?25l";
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Alternate screen with saved cursor (1049).
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Report presses, releases and drags (1002) in SGR coordinates (1006).
pub const MOUSE_ON: &str = "\x1b[?1002h\x1b[?1006h";
pub const MOUSE_OFF: &str = "\x1b[?1002l\x1b[?1006l";

/// OSC 0 wraps a window title.
pub const TITLE_PREFIX: &str = "\x1b]0;";
pub const TITLE_SUFFIX: &str = "\x1b\\";

/// Synchronized output (mode 2026); terminals without it ignore both.
pub mod sync {
    pub const BEGIN: &str = "\x1b[?2026h";
    pub const END: &str = "\x1b[?2026l";
}
