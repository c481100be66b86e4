//! Host event and log callback system.
//!
//! The desk reports what it does through two channels: `tracing` for
//! diagnostics, and the callbacks registered here for hosts that want to
//! react to the animation (update a status line, record a replay, ...).

use std::sync::{Mutex, OnceLock};

/// Log level for host log callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Event names emitted through [`emit_event`].
pub mod names {
    pub const PHASE_START: &str = "phase.start";
    pub const PHASE_COMPLETE: &str = "phase.complete";
    pub const ANIMATION_SKIPPED: &str = "animation.skipped";
    pub const ANIMATION_DONE: &str = "animation.done";
    pub const DOCK_REVEALED: &str = "dock.revealed";
    pub const WINDOW_DECORATED: &str = "window.decorated";
    pub const WINDOW_RAISED: &str = "window.raised";
    pub const WINDOW_CLOSED: &str = "window.closed";
    pub const ZORDER_RENUMBERED: &str = "zorder.renumbered";
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
    }
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    tracing::trace!(event = name, data, "desk event");
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit a log message to the host callback.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
