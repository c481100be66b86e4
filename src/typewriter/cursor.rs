//! Grapheme cursor over a phase's text.

use unicode_segmentation::UnicodeSegmentation;

/// Position of the engine inside one phase's text.
///
/// Indices count extended grapheme clusters, so an emoji or a combining
/// sequence is typed in a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteCursor {
    /// Byte offset of each grapheme start, plus the text length.
    bounds: Vec<usize>,
    index: usize,
}

impl WriteCursor {
    #[must_use]
    pub fn new(text: &str, start_index: usize) -> Self {
        let mut bounds: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        bounds.push(text.len());
        let len = bounds.len() - 1;
        Self {
            bounds,
            index: start_index.min(len),
        }
    }

    /// Number of graphemes in the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.index >= self.len()
    }

    /// Advance by up to `count` graphemes, returning the slice passed over.
    pub fn advance<'t>(&mut self, text: &'t str, count: usize) -> &'t str {
        let start = self.index;
        let end = start.saturating_add(count).min(self.len());
        self.index = end;
        &text[self.bounds[start]..self.bounds[end]]
    }

    /// The last two graphemes written plus the next one to write.
    ///
    /// Before two graphemes are written the window start counts back from
    /// the end of the text, so it is empty unless the text is that short.
    #[must_use]
    pub fn trailing_window<'t>(&self, text: &'t str) -> &'t str {
        let len = self.len();
        let end = (self.index + 1).min(len);
        let start = match self.index.checked_sub(2) {
            Some(start) => start,
            None => len.saturating_sub(2 - self.index),
        };
        if start >= end {
            return "";
        }
        &text[self.bounds[start]..self.bounds[end]]
    }

    /// Text not yet written.
    #[must_use]
    pub fn remaining<'t>(&self, text: &'t str) -> &'t str {
        &text[self.bounds[self.index]..]
    }
}
