//! Colours as typed into the live style sheet.
//!
//! Only opaque 24-bit colours are painted; CSS alpha is dropped.

use std::fmt;

/// An opaque RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (alpha ignored).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            6 | 8 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => None,
        }
    }

    /// Parse a CSS colour value: hex, `rgb(r, g, b)`, or a handful of names.
    ///
    /// Shorthand values such as `1px solid #373b41` resolve to their first
    /// colour token.
    #[must_use]
    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.trim().trim_end_matches("!important").trim();
        if let Some(args) = value
            .strip_prefix("rgb(")
            .or_else(|| value.strip_prefix("rgba("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let mut parts = args.split(',').map(|p| p.trim().parse::<u8>().ok());
            return Some(Self::new(parts.next()??, parts.next()??, parts.next()??));
        }
        value.split_whitespace().find_map(|token| {
            if token.starts_with('#') {
                Self::from_hex(token)
            } else {
                named(token)
            }
        })
    }

    /// Relative luminance in [0, 1], used to pick a readable contrast colour.
    #[must_use]
    pub fn luminance(self) -> f32 {
        (0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b))
            / 255.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn named(name: &str) -> Option<Rgb> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" => Rgb::BLACK,
        "white" => Rgb::WHITE,
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 128, 0),
        "blue" => Rgb::new(0, 0, 255),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "silver" => Rgb::new(192, 192, 192),
        "yellow" => Rgb::new(255, 255, 0),
        "orange" => Rgb::new(255, 165, 0),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#1d1f21"), Some(Rgb::new(0x1d, 0x1f, 0x21)));
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("#00000080"), Some(Rgb::BLACK));
        assert_eq!(Rgb::from_hex("#12"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_from_css_values() {
        assert_eq!(Rgb::from_css("  #c5c8c6 "), Some(Rgb::new(0xc5, 0xc8, 0xc6)));
        assert_eq!(Rgb::from_css("rgb(1, 2, 3)"), Some(Rgb::new(1, 2, 3)));
        assert_eq!(
            Rgb::from_css("1px solid #373b41"),
            Some(Rgb::new(0x37, 0x3b, 0x41))
        );
        assert_eq!(Rgb::from_css("white !important"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_css("inherit"), None);
    }

    #[test]
    fn test_display_round_trips_hex() {
        let c = Rgb::new(0xf0, 0xc6, 0x74);
        assert_eq!(c.to_string(), "#f0c674");
        assert_eq!(Rgb::from_hex(&c.to_string()), Some(c));
    }

    #[test]
    fn test_luminance_orders_black_and_white() {
        assert!(Rgb::BLACK.luminance() < 0.01);
        assert!(Rgb::WHITE.luminance() > 0.99);
    }
}
