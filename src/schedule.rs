//! Host-driven timers and animation frames.
//!
//! Nothing in the desk sleeps. Work is queued on a [`Timeline`] with a
//! deadline, and the host advances the timeline's clock (by real elapsed
//! time in a terminal, by hand in tests). Pointer-driven updates are
//! coalesced in a [`FrameSlot`] and applied when the host reports an
//! animation frame.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// A timer that has come due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Due<T> {
    /// Deadline the timer was scheduled for.
    pub at: Duration,
    pub task: T,
}

#[derive(Debug)]
struct Entry<T> {
    at: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap pops the earliest deadline, ties in FIFO order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual clock plus an ordered timer queue.
#[derive(Debug)]
pub struct Timeline<T> {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current time on the timeline.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `task` to run `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let at = self.now.saturating_add(delay);
        self.seq += 1;
        self.queue.push(Entry {
            at,
            seq: self.seq,
            task,
        });
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|e| e.at)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the next timer due at or before `until`, moving the clock to its
    /// deadline.
    ///
    /// Callers loop on this rather than draining a batch so that timers
    /// scheduled while handling one are considered in the same advance.
    pub fn pop_due(&mut self, until: Duration) -> Option<Due<T>> {
        if self.queue.peek().is_some_and(|e| e.at <= until) {
            let entry = self.queue.pop()?;
            self.now = self.now.max(entry.at);
            Some(Due {
                at: entry.at,
                task: entry.task,
            })
        } else {
            None
        }
    }

    /// Move the clock forward to `until` once no more timers are due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Drop all pending timers.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// A single pending animation-frame update.
///
/// Requesting a frame while one is pending replaces it, so at most one update
/// is applied per frame no matter how many pointer moves arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSlot<T> {
    pending: Option<T>,
    requests: u64,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self {
            pending: None,
            requests: 0,
        }
    }
}

impl<T> FrameSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame, replacing any not-yet-fired update.
    pub fn request(&mut self, update: T) {
        self.requests += 1;
        self.pending = Some(update);
    }

    /// Cancel the pending update.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Take the update for the frame being drawn.
    pub fn fire(&mut self) -> Option<T> {
        self.pending.take()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total number of requests made, fired or not.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.requests
    }
}
