//! Punctuation-aware tick delays.
//!
//! After each tick the engine looks at a short window of text around the
//! cursor: the last two characters written and the next one to be written.
//! Commas, paragraph breaks and sentence ends stretch the delay so the typing
//! reads like someone thinking.

use std::sync::LazyLock;
use std::time::Duration;

use regex_lite::Regex;

static COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D,\s$").expect("comma regex"));
static END_OF_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^/]\n\n$").expect("block regex"));
static END_OF_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]\s$").expect("sentence regex"));

/// Delay tier chosen for the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pace {
    Normal,
    Comma,
    EndOfBlock,
    EndOfSentence,
}

impl Pace {
    /// Classify the trailing window.
    ///
    /// Every rule is tested in order and the last one that matches wins, so a
    /// sentence end beats a paragraph break which beats a comma.
    #[must_use]
    pub fn of_window(window: &str) -> Self {
        let mut pace = Self::Normal;
        if COMMA.is_match(window) {
            pace = Self::Comma;
        }
        if END_OF_BLOCK.is_match(window) {
            pace = Self::EndOfBlock;
        }
        if END_OF_SENTENCE.is_match(window) {
            pace = Self::EndOfSentence;
        }
        pace
    }

    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Comma => 30,
            Self::EndOfBlock => 50,
            Self::EndOfSentence => 70,
        }
    }

    /// Whether this tier is one of the punctuation pauses.
    #[must_use]
    pub const fn is_punctuation(self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Delay before the next tick for a phase typing at `base`.
    #[must_use]
    pub fn delay(self, base: Duration) -> Duration {
        base.saturating_mul(self.multiplier())
    }
}
