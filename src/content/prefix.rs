//! Vendor-prefix detection.
//!
//! The built-in style fragments are written with `-webkit-`; the page swaps it
//! for whatever the [`PrefixDetector`] reports before typing starts.

use crate::content::PrefixDetector;

/// The prefix the built-in style fragments are written with.
pub const SOURCE_PREFIX: &str = "-webkit-";

/// A detector that always reports the same prefix.
///
/// Terminals have no vendor engine to sniff, so hosts pick one up front. An
/// empty prefix strips vendor prefixes entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPrefix(pub String);

impl Default for FixedPrefix {
    fn default() -> Self {
        Self(SOURCE_PREFIX.to_string())
    }
}

impl PrefixDetector for FixedPrefix {
    fn detect_prefix(&self) -> String {
        self.0.clone()
    }
}
