//! ANSI escape sequence generation.

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::color::Rgb;
use std::io::{self, Write};

/// Write a u8 as decimal digits without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    loop {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
        if val == 0 {
            break;
        }
    }
    w.write_all(&buf[i..])
}

fn write_rgb(w: &mut impl Write, prefix: &[u8], color: Rgb) -> io::Result<()> {
    w.write_all(prefix)?;
    write_u8_decimal(w, color.r)?;
    w.write_all(b";")?;
    write_u8_decimal(w, color.g)?;
    w.write_all(b";")?;
    write_u8_decimal(w, color.b)?;
    w.write_all(b"m")
}

/// Write a truecolor foreground SGR sequence.
pub fn write_fg_color(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    write_rgb(w, b"\x1b[38;2;", color)
}

/// Write a truecolor background SGR sequence.
pub fn write_bg_color(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    write_rgb(w, b"\x1b[48;2;", color)
}

/// Write a cursor position sequence (zero-based in, one-based out).
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row + 1)?;
    w.write_all(b";")?;
    write_u32_decimal(w, col + 1)?;
    w.write_all(b"H")
}

/// Cursor position sequence as a string.
#[must_use]
pub fn cursor_position(row: u32, col: u32) -> String {
    let mut buf = Vec::new();
    let _ = write_cursor_position(&mut buf, row, col);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truecolor_sequences() {
        let mut buf = Vec::new();
        write_fg_color(&mut buf, Rgb::new(255, 128, 0)).unwrap();
        write_bg_color(&mut buf, Rgb::new(0, 7, 42)).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\x1b[38;2;255;128;0m\x1b[48;2;0;7;42m"
        );
    }

    #[test]
    fn test_cursor_position_is_one_based() {
        assert_eq!(cursor_position(0, 0), "\x1b[1;1H");
        assert_eq!(cursor_position(23, 79), "\x1b[24;80H");
        assert_eq!(cursor_position(1233, 99_999), "\x1b[1234;100000H");
    }
}
