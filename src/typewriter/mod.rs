//! Character-paced typing with punctuation-aware timing.
//!
//! A [`Typewriter`] walks an ordered list of [`AnimationPhase`]s. Each call
//! to [`Typewriter::step`] appends the next characters of the current phase
//! to a [`TypeSink`] and tells the host how long to wait before stepping
//! again. Pausing and skipping go through a shared [`Session`].

mod cursor;
mod engine;
mod mirror;
mod pacing;
mod session;

pub use cursor::WriteCursor;
pub use engine::{AnimationPhase, PhaseHook, RunState, Tick, TypeSink, Typewriter};
pub use mirror::{Declaration, Rule, StyleMirror, StyleSheet, class};
pub use pacing::Pace;
pub use session::{CancellationToken, PauseFlag, Session};
