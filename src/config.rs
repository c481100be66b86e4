//! Desk configuration.
//!
//! [`DeskOptions`] carries every tunable the typewriter and the window
//! manager read. Defaults use browser-like pixel units; [`DeskOptions::terminal`]
//! scales the window metrics down to terminal cells.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// When a paused session holds back the next tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PauseMode {
    /// Pause is polled after every tick delay.
    #[default]
    EveryTick,
    /// Pause is only polled after comma, paragraph and sentence delays.
    PunctuationOnly,
}

impl PauseMode {
    /// Parse the `TYPEDESK_PAUSE_MODE` spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "every-tick" | "every_tick" | "tick" => Some(Self::EveryTick),
            "punctuation" | "punctuation-only" => Some(Self::PunctuationOnly),
            _ => None,
        }
    }
}

/// Sizes the window manager clamps against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowMetrics {
    /// Minimum surface width while resizing.
    pub min_width: i32,
    /// Minimum surface height while resizing.
    pub min_height: i32,
    /// Portion of a dragged surface that must stay on screen.
    pub visible_margin: i32,
    /// Height reserved for the dock at the bottom of the viewport.
    pub dock_height: i32,
    /// Height of the draggable title bar.
    pub title_height: i32,
    /// Thickness of the resize handles along each edge.
    pub handle_thickness: i32,
    /// Width of each control button in the title bar.
    pub button_width: i32,
}

impl Default for WindowMetrics {
    fn default() -> Self {
        Self {
            min_width: 200,
            min_height: 150,
            visible_margin: 40,
            dock_height: 80,
            title_height: 28,
            handle_thickness: 6,
            button_width: 20,
        }
    }
}

impl WindowMetrics {
    /// Metrics in terminal cells.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            min_width: 20,
            min_height: 6,
            visible_margin: 4,
            dock_height: 1,
            title_height: 1,
            handle_thickness: 1,
            button_width: 2,
        }
    }
}

/// Z-index range for raised surfaces.
///
/// A renumbering pass packs every window from `base`, so the range must be
/// wider than the number of windows for raised values to stay within
/// `ceiling` (see [`ZLimits::holds`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZLimits {
    /// First value handed out after a renumbering pass.
    pub base: i32,
    /// Largest value the counter may reach before renumbering.
    pub ceiling: i32,
}

impl ZLimits {
    /// Whether `windows` surfaces can be stacked without passing the ceiling.
    #[must_use]
    pub fn holds(self, windows: usize) -> bool {
        i64::from(self.ceiling) - i64::from(self.base) > windows as i64
    }
}

impl Default for ZLimits {
    fn default() -> Self {
        Self {
            base: 1000,
            ceiling: 9999,
        }
    }
}

/// Placement of the gif window, relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GifWindowOptions {
    pub left_frac: f32,
    pub top_frac: f32,
    pub width: i32,
    pub height: i32,
}

impl Default for GifWindowOptions {
    fn default() -> Self {
        Self {
            left_frac: 0.25,
            top_frac: 0.2,
            width: 550,
            height: 450,
        }
    }
}

/// Options for a desk session.
#[derive(Clone, Debug, PartialEq)]
pub struct DeskOptions {
    /// Per-character delay for most phases.
    pub speed: Duration,
    /// Multiplier applied to `speed` for the conversational intro.
    pub comment_slowdown: u32,
    /// Pauses after each of the five phases.
    pub phase_pauses: [Duration; 5],
    /// Deferral before surfaces are decorated once the script ends.
    pub decorate_delay: Duration,
    /// Scope of the pause control.
    pub pause_mode: PauseMode,
    /// Hide dock items until the dock phase has been typed.
    pub dock_reveal: bool,
    /// Characters appended per tick.
    pub chars_per_tick: usize,
    pub metrics: WindowMetrics,
    pub z: ZLimits,
    pub gif_window: GifWindowOptions,
}

impl Default for DeskOptions {
    fn default() -> Self {
        Self {
            speed: Duration::from_millis(16),
            comment_slowdown: 3,
            phase_pauses: [
                Duration::from_millis(3000),
                Duration::from_millis(3000),
                Duration::from_millis(2000),
                Duration::from_millis(1500),
                Duration::from_millis(2000),
            ],
            decorate_delay: Duration::from_millis(100),
            pause_mode: PauseMode::default(),
            dock_reveal: false,
            chars_per_tick: 1,
            metrics: WindowMetrics::default(),
            z: ZLimits::default(),
            gif_window: GifWindowOptions::default(),
        }
    }
}

impl DeskOptions {
    /// Options for a terminal host: cell-sized metrics and a gif window that
    /// fits an 80x24 screen.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            metrics: WindowMetrics::terminal(),
            gif_window: GifWindowOptions {
                left_frac: 0.25,
                top_frac: 0.2,
                width: 44,
                height: 12,
            },
            ..Self::default()
        }
    }

    /// Fast typing for local iteration.
    #[must_use]
    pub fn development(self) -> Self {
        self.with_speed(Duration::from_micros(200))
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_pause_mode(mut self, mode: PauseMode) -> Self {
        self.pause_mode = mode;
        self
    }

    #[must_use]
    pub fn with_dock_reveal(mut self, enabled: bool) -> Self {
        self.dock_reveal = enabled;
        self
    }

    #[must_use]
    pub fn with_phase_pauses(mut self, pauses: [Duration; 5]) -> Self {
        self.phase_pauses = pauses;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: WindowMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_z_limits(mut self, z: ZLimits) -> Self {
        self.z = z;
        self
    }

    /// Per-character delay of the intro comment phase.
    #[must_use]
    pub fn comment_speed(&self) -> Duration {
        self.speed.saturating_mul(self.comment_slowdown)
    }

    /// Apply `TYPEDESK_*` environment overrides on top of `self`.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|key| env::var(key).ok())
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if var("TYPEDESK_DEV").is_some_and(|v| is_truthy(&v)) {
            self = self.development();
        }
        if let Some(ms) = var("TYPEDESK_SPEED_MS") {
            let ms: f64 = ms
                .trim()
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("TYPEDESK_SPEED_MS={ms}")))?;
            if !ms.is_finite() || ms < 0.0 {
                return Err(Error::InvalidConfig(format!("TYPEDESK_SPEED_MS={ms}")));
            }
            self.speed = Duration::from_secs_f64(ms / 1000.0);
        }
        if let Some(mode) = var("TYPEDESK_PAUSE_MODE") {
            self.pause_mode = PauseMode::parse(&mode)
                .ok_or_else(|| Error::InvalidConfig(format!("TYPEDESK_PAUSE_MODE={mode}")))?;
        }
        if let Some(flag) = var("TYPEDESK_DOCK_REVEAL") {
            self.dock_reveal = is_truthy(&flag);
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject option values the desk cannot run with.
    pub fn validate(&self) -> Result<()> {
        let m = &self.metrics;
        if m.min_width <= 0 || m.min_height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "minimum size must be positive, got {}x{}",
                m.min_width, m.min_height
            )));
        }
        if m.visible_margin < 0 || m.dock_height < 0 || m.title_height < 0 {
            return Err(Error::InvalidConfig(
                "margins and bar heights must not be negative".to_string(),
            ));
        }
        if self.z.ceiling <= self.z.base {
            return Err(Error::InvalidConfig(format!(
                "z ceiling {} must exceed base {}",
                self.z.ceiling, self.z.base
            )));
        }
        if self.speed.is_zero() {
            return Err(Error::InvalidConfig(
                "per-character delay must be positive".to_string(),
            ));
        }
        if self.chars_per_tick == 0 {
            return Err(Error::InvalidConfig(
                "chars_per_tick must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_page_timing() {
        let opts = DeskOptions::default();
        assert_eq!(opts.speed, Duration::from_millis(16));
        assert_eq!(opts.comment_speed(), Duration::from_millis(48));
        assert_eq!(opts.decorate_delay, Duration::from_millis(100));
        assert_eq!(opts.metrics.min_width, 200);
        assert_eq!(opts.metrics.min_height, 150);
        assert_eq!(opts.metrics.visible_margin, 40);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_development_speed() {
        let opts = DeskOptions::default().development();
        assert_eq!(opts.speed, Duration::from_micros(200));
    }

    #[test]
    fn test_env_overrides() {
        let opts = DeskOptions::default()
            .apply_vars(vars(&[
                ("TYPEDESK_SPEED_MS", "2.5"),
                ("TYPEDESK_PAUSE_MODE", "punctuation"),
                ("TYPEDESK_DOCK_REVEAL", "yes"),
            ]))
            .unwrap();
        assert_eq!(opts.speed, Duration::from_micros(2500));
        assert_eq!(opts.pause_mode, PauseMode::PunctuationOnly);
        assert!(opts.dock_reveal);
    }

    #[test]
    fn test_env_dev_flag() {
        let opts = DeskOptions::default()
            .apply_vars(vars(&[("TYPEDESK_DEV", "1")]))
            .unwrap();
        assert_eq!(opts.speed, Duration::from_micros(200));
    }

    #[test]
    fn test_env_rejects_garbage() {
        let err = DeskOptions::default()
            .apply_vars(vars(&[("TYPEDESK_SPEED_MS", "fast")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = DeskOptions::default()
            .apply_vars(vars(&[("TYPEDESK_PAUSE_MODE", "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = DeskOptions::default()
            .apply_vars(vars(&[("TYPEDESK_SPEED_MS", "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_zero_speed() {
        let opts = DeskOptions::default().with_speed(Duration::ZERO);
        assert!(matches!(opts.validate(), Err(Error::InvalidConfig(_))));
        assert!(DeskOptions::default().development().validate().is_ok());
    }

    #[test]
    fn test_z_limits_hold_windows() {
        let z = ZLimits {
            base: 10,
            ceiling: 13,
        };
        assert!(z.holds(2));
        assert!(!z.holds(3));
        assert!(ZLimits::default().holds(3));
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let opts = DeskOptions::default().with_z_limits(ZLimits {
            base: 10,
            ceiling: 10,
        });
        assert!(opts.validate().is_err());

        let mut metrics = WindowMetrics::default();
        metrics.min_width = 0;
        assert!(DeskOptions::default().with_metrics(metrics).validate().is_err());
    }
}
