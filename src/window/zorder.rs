//! Z-index allocation.

use crate::config::ZLimits;

/// Monotonic z-index counter with a ceiling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZOrder {
    limits: ZLimits,
    counter: i32,
}

impl ZOrder {
    #[must_use]
    pub fn new(limits: ZLimits) -> Self {
        Self {
            limits,
            counter: limits.base,
        }
    }

    /// Last value handed out (the base before any raise).
    #[must_use]
    pub fn current(&self) -> i32 {
        self.counter
    }

    #[must_use]
    pub fn limits(&self) -> ZLimits {
        self.limits
    }

    /// Whether the next raise would pass the ceiling.
    #[must_use]
    pub fn would_overflow(&self) -> bool {
        self.counter >= self.limits.ceiling
    }

    /// Hand out the next value.
    pub fn advance(&mut self) -> i32 {
        self.counter += 1;
        self.counter
    }

    /// Renumber `slots` densely from the base, in iteration order, and reset
    /// the counter to `base + count`.
    pub fn renumber<'a>(&mut self, slots: impl IntoIterator<Item = &'a mut i32>) -> usize {
        let mut count = 0;
        for (i, z) in slots.into_iter().enumerate() {
            *z = self.limits.base + i as i32;
            count += 1;
        }
        self.counter = self.limits.base + count as i32;
        count
    }
}
