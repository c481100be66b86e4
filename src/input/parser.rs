//! Byte parser for terminal input.
//!
//! Turns raw bytes from a raw-mode terminal into key presses and SGR (1006)
//! pointer events. Sequences the desk has no binding for are consumed and
//! reported as [`Event::Ignored`] so the caller can keep draining its buffer.

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
#![allow(clippy::unused_self)]

use crate::input::event::{Event, MouseButton, PointerEvent, PointerKind};
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Lines scrolled per wheel notch.
pub const WHEEL_LINES: i32 = 3;

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Malformed escape sequence; the bytes are dropped.
    Unrecognized(Vec<u8>),
    InvalidUtf8,
}

/// An event and the number of bytes it used.
pub type ParseResult = Result<(Event, usize), ParseError>;

#[derive(Clone, Copy, Debug, Default)]
pub struct InputParser;

impl InputParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse one event from the front of `input`.
    pub fn parse(&mut self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };
        match first {
            0x1b => self.parse_escape(input),
            b'\r' | b'\n' => Ok((KeyEvent::key(KeyCode::Enter).into(), 1)),
            b'\t' => Ok((KeyEvent::key(KeyCode::Tab).into(), 1)),
            0x08 | 0x7f => Ok((KeyEvent::key(KeyCode::Backspace).into(), 1)),
            0x01..=0x1a => {
                let c = (first - 1 + b'a') as char;
                Ok((KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL).into(), 1))
            }
            0x20..=0x7e => Ok((KeyEvent::char(first as char).into(), 1)),
            0x80..=0xff => self.parse_utf8(input),
            _ => Ok((Event::Ignored, 1)),
        }
    }

    /// Parse every complete event in `input`. Returns the events and the
    /// number of bytes consumed; an incomplete tail is left for the next read.
    pub fn parse_all(&mut self, input: &[u8]) -> (Vec<Event>, usize) {
        let mut events = Vec::new();
        let mut offset = 0;
        while offset < input.len() {
            match self.parse(&input[offset..]) {
                Ok((event, used)) => {
                    events.push(event);
                    offset += used;
                }
                Err(ParseError::Incomplete) => break,
                Err(ParseError::Unrecognized(bytes)) => offset += bytes.len().max(1),
                Err(ParseError::Empty | ParseError::InvalidUtf8) => offset += 1,
            }
        }
        (events, offset)
    }

    fn parse_escape(&mut self, input: &[u8]) -> ParseResult {
        let Some(&second) = input.get(1) else {
            return Err(ParseError::Incomplete);
        };
        match second {
            b'[' => self.parse_csi(input),
            b'O' => self.parse_ss3(input),
            0x20..=0x7e => Ok((
                KeyEvent::new(KeyCode::Char(second as char), KeyModifiers::ALT).into(),
                2,
            )),
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    /// Parse a CSI sequence (ESC [ ...).
    fn parse_csi(&mut self, input: &[u8]) -> ParseResult {
        let Some(offset) = input[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
            return Err(ParseError::Incomplete);
        };
        let end = offset + 2;
        let params = &input[2..end];
        let consumed = end + 1;

        match input[end] {
            b'A' => Ok((KeyEvent::key(KeyCode::Up).into(), consumed)),
            b'B' => Ok((KeyEvent::key(KeyCode::Down).into(), consumed)),
            b'~' => {
                let code = match params {
                    b"5" => KeyCode::PageUp,
                    b"6" => KeyCode::PageDown,
                    _ => return Ok((Event::Ignored, consumed)),
                };
                Ok((KeyEvent::key(code).into(), consumed))
            }
            b'M' | b'm' if params.first() == Some(&b'<') => {
                self.parse_sgr_mouse(&params[1..], input[end] == b'm', consumed)
                    .ok_or_else(|| ParseError::Unrecognized(input[..consumed].to_vec()))
            }
            _ => Ok((Event::Ignored, consumed)),
        }
    }

    /// Parse SS3 keys (ESC O A, ESC O B, ...).
    fn parse_ss3(&mut self, input: &[u8]) -> ParseResult {
        let Some(&code) = input.get(2) else {
            return Err(ParseError::Incomplete);
        };
        let event = match code {
            b'A' => KeyEvent::key(KeyCode::Up).into(),
            b'B' => KeyEvent::key(KeyCode::Down).into(),
            _ => Event::Ignored,
        };
        Ok((event, 3))
    }

    /// Parse SGR mouse parameters (`Pb ; Px ; Py`) with 1-based coordinates.
    fn parse_sgr_mouse(&self, params: &[u8], release: bool, consumed: usize) -> Option<(Event, usize)> {
        let s = std::str::from_utf8(params).ok()?;
        let mut parts = s.split(';');
        let cb: u16 = parts.next()?.parse().ok()?;
        let cx: u32 = parts.next()?.parse().ok()?;
        let cy: u32 = parts.next()?.parse().ok()?;

        let (button, kind) = decode_sgr_button(cb, release);
        let event = PointerEvent::new(cx.saturating_sub(1), cy.saturating_sub(1), button, kind);
        Some((event.into(), consumed))
    }

    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];
        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8);
        };
        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let s = std::str::from_utf8(&input[..expected_len]).map_err(|_| ParseError::InvalidUtf8)?;
        let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;
        Ok((KeyEvent::char(c).into(), expected_len))
    }
}

/// Decode the SGR button byte.
fn decode_sgr_button(cb: u16, release: bool) -> (MouseButton, PointerKind) {
    let low = cb & 0b0000_0011;
    let motion = cb & 0b0010_0000 != 0;
    let wheel = cb & 0b0100_0000 != 0;

    if wheel {
        let lines = match low {
            0 => -WHEEL_LINES,
            1 => WHEEL_LINES,
            _ => 0,
        };
        return (MouseButton::None, PointerKind::Wheel(lines));
    }
    let button = match low {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::None,
    };
    let kind = if release {
        PointerKind::Release
    } else if motion && button == MouseButton::None {
        PointerKind::Move
    } else if motion {
        PointerKind::Drag
    } else {
        PointerKind::Press
    };
    (button, kind)
}
