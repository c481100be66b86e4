//! The typewriter state machine.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::PauseMode;
use crate::event::{emit_event, names};
use crate::typewriter::cursor::WriteCursor;
use crate::typewriter::pacing::Pace;
use crate::typewriter::session::Session;

/// Shortest wait between pause polls, so a paused run always yields to the host.
pub const MIN_PAUSE_POLL: Duration = Duration::from_millis(1);

/// Work to run when a phase has been fully typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhaseHook {
    #[default]
    None,
    /// Show the dock items.
    RevealDock,
    /// Swap the typed portfolio text for its rendered markdown.
    RenderWorkBox,
}

/// One run of the engine against a single text and target surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationPhase {
    pub target: String,
    pub text: String,
    pub start_index: usize,
    /// Delay per tick before punctuation stretching.
    pub delay: Duration,
    /// Forward typed characters to the style mirror.
    pub mirror: bool,
    pub chars_per_tick: usize,
    /// Rest after the last character before the next phase starts.
    pub pause_after: Duration,
    pub hook: PhaseHook,
}

impl AnimationPhase {
    #[must_use]
    pub fn new(target: impl Into<String>, text: impl Into<String>, delay: Duration) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
            start_index: 0,
            delay,
            mirror: false,
            chars_per_tick: 1,
            pause_after: Duration::ZERO,
            hook: PhaseHook::None,
        }
    }

    #[must_use]
    pub fn mirrored(mut self) -> Self {
        self.mirror = true;
        self
    }

    #[must_use]
    pub fn starting_at(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    #[must_use]
    pub fn with_chars_per_tick(mut self, count: usize) -> Self {
        self.chars_per_tick = count.max(1);
        self
    }

    #[must_use]
    pub fn with_pause_after(mut self, pause: Duration) -> Self {
        self.pause_after = pause;
        self
    }

    #[must_use]
    pub fn with_hook(mut self, hook: PhaseHook) -> Self {
        self.hook = hook;
        self
    }
}

/// Receiver of typed text.
pub trait TypeSink {
    /// Append `chunk` to `target` and keep it scrolled to the bottom.
    /// When `mirror` is set the chunk also feeds the live style sheet.
    fn write(&mut self, target: &str, chunk: &str, mirror: bool);
}

/// What the host should do after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Step again after this delay.
    Wait(Duration),
    /// A phase finished; run its hook, then step again after `rest`.
    PhaseComplete {
        phase: usize,
        hook: PhaseHook,
        rest: Duration,
    },
    /// Every phase has been typed.
    Finished,
    /// Skip was requested; run the instant-completion fallback.
    Skipped,
}

/// Observable engine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Writing { phase: usize, index: usize },
    Resting { phase: usize },
    Done,
    Skipped,
}

#[derive(Debug)]
enum State {
    Idle,
    Writing {
        phase: usize,
        cursor: WriteCursor,
        pending: Option<(Duration, Pace)>,
    },
    Resting {
        phase: usize,
    },
    Done,
    Skipped,
}

/// Drives a fixed sequence of phases, one tick per [`Typewriter::step`].
#[derive(Debug)]
pub struct Typewriter {
    phases: Vec<AnimationPhase>,
    session: Session,
    pause_mode: PauseMode,
    state: State,
}

impl Typewriter {
    #[must_use]
    pub fn new(phases: Vec<AnimationPhase>, session: Session, pause_mode: PauseMode) -> Self {
        Self {
            phases,
            session,
            pause_mode,
            state: State::Idle,
        }
    }

    #[must_use]
    pub fn phases(&self) -> &[AnimationPhase] {
        &self.phases
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        match &self.state {
            State::Idle => RunState::Idle,
            State::Writing { phase, cursor, .. } => RunState::Writing {
                phase: *phase,
                index: cursor.index(),
            },
            State::Resting { phase } => RunState::Resting { phase: *phase },
            State::Done => RunState::Done,
            State::Skipped => RunState::Skipped,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.state, State::Done | State::Skipped)
    }

    /// Concatenation of every mirrored phase's text.
    #[must_use]
    pub fn mirrored_text(&self) -> String {
        self.phases
            .iter()
            .filter(|p| p.mirror)
            .map(|p| p.text.as_str())
            .collect()
    }

    /// Advance by one tick.
    pub fn step<S: TypeSink + ?Sized>(&mut self, sink: &mut S) -> Tick {
        match self.state {
            State::Done => return Tick::Finished,
            State::Skipped => return Tick::Skipped,
            _ => {}
        }
        if self.session.skip_requested() {
            info!(state = ?self.state(), "skip requested");
            self.state = State::Skipped;
            return Tick::Skipped;
        }

        match self.state {
            State::Idle => self.begin_phase(0),
            State::Resting { phase } => self.begin_phase(phase + 1),
            _ => {}
        }

        let State::Writing {
            phase,
            cursor,
            pending,
        } = &mut self.state
        else {
            return Tick::Finished;
        };
        let current = &self.phases[*phase];

        if let Some((delay, pace)) = *pending {
            let holds = match self.pause_mode {
                PauseMode::EveryTick => true,
                PauseMode::PunctuationOnly => pace.is_punctuation(),
            };
            if holds && self.session.is_paused() {
                return Tick::Wait(delay.max(MIN_PAUSE_POLL));
            }
        }
        *pending = None;

        let chunk = cursor.advance(&current.text, current.chars_per_tick);
        if !chunk.is_empty() {
            sink.write(&current.target, chunk, current.mirror);
        }

        if cursor.is_finished() {
            let phase = *phase;
            let hook = current.hook;
            let rest = current.pause_after;
            debug!(phase, target = %current.target, "phase complete");
            emit_event(names::PHASE_COMPLETE, &phase.to_string());
            self.state = State::Resting { phase };
            return Tick::PhaseComplete { phase, hook, rest };
        }

        let pace = Pace::of_window(cursor.trailing_window(&current.text));
        let delay = pace.delay(current.delay);
        *pending = Some((delay, pace));
        Tick::Wait(delay)
    }

    fn begin_phase(&mut self, phase: usize) {
        match self.phases.get(phase) {
            Some(current) => {
                debug!(phase, target = %current.target, chars = current.text.len(), "phase start");
                emit_event(names::PHASE_START, &phase.to_string());
                self.state = State::Writing {
                    phase,
                    cursor: WriteCursor::new(&current.text, current.start_index),
                    pending: None,
                };
            }
            None => {
                info!(phases = self.phases.len(), "script finished");
                self.state = State::Done;
            }
        }
    }
}
