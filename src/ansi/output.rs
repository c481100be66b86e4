//! Buffered ANSI output writer with state tracking.

use crate::ansi;
use crate::color::Rgb;
use crate::renderer::{Cell, CellStyle};
use std::io::{self, Write};

/// Buffered writer that tracks ANSI state to minimize escape sequences.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,

    // Current state for delta encoding
    current_fg: Option<Rgb>,
    current_bg: Option<Rgb>,
    bold: bool,
    italic: bool,
    underline: bool,

    // Cursor position, unknown until the first absolute move
    cursor: Option<(u32, u32)>,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            current_fg: None,
            current_bg: None,
            bold: false,
            italic: false,
            underline: false,
            cursor: None,
        }
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move the cursor unless it is already there.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        if self.cursor == Some((row, col)) {
            return;
        }
        let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        self.cursor = Some((row, col));
    }

    /// Set foreground color if different from current.
    pub fn set_fg(&mut self, color: Rgb) {
        if self.current_fg != Some(color) {
            let _ = ansi::write_fg_color(&mut self.buffer, color);
            self.current_fg = Some(color);
        }
    }

    /// Set background color if different from current.
    pub fn set_bg(&mut self, color: Rgb) {
        if self.current_bg != Some(color) {
            let _ = ansi::write_bg_color(&mut self.buffer, color);
            self.current_bg = Some(color);
        }
    }

    /// Bring attributes, then colours, in line with `style`.
    pub fn set_style(&mut self, style: CellStyle) {
        toggle(&mut self.buffer, &mut self.bold, style.bold, b"\x1b[1m", b"\x1b[22m");
        toggle(&mut self.buffer, &mut self.italic, style.italic, b"\x1b[3m", b"\x1b[23m");
        toggle(&mut self.buffer, &mut self.underline, style.underline, b"\x1b[4m", b"\x1b[24m");
        self.set_fg(style.fg);
        self.set_bg(style.bg);
    }

    /// Write a cell at the current cursor position.
    pub fn write_cell(&mut self, cell: &Cell) {
        if cell.is_continuation() {
            return;
        }
        self.set_style(cell.style);
        self.buffer.extend_from_slice(cell.symbol().as_bytes());
        if let Some((row, col)) = self.cursor {
            let width = crate::renderer::text_width(cell.symbol()).max(1) as u32;
            self.cursor = Some((row, col + width));
        }
    }

    /// Write a cell at a specific position.
    pub fn write_cell_at(&mut self, row: u32, col: u32, cell: &Cell) {
        self.move_cursor(row, col);
        self.write_cell(cell);
    }

    /// Reset attributes and forget tracked state.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_fg = None;
        self.current_bg = None;
        self.bold = false;
        self.italic = false;
        self.underline = false;
    }

    /// Bytes buffered so far.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }
}

fn toggle(buffer: &mut Vec<u8>, state: &mut bool, on: bool, set: &[u8], unset: &[u8]) {
    if *state != on {
        *state = on;
        buffer.extend_from_slice(if on { set } else { unset });
    }
}
