//! The fixed five-phase script.

use crate::config::DeskOptions;
use crate::content::Payload;
use crate::page::document::ids;
use crate::typewriter::{AnimationPhase, PhaseHook};

/// Intro comment, dock styling, portfolio text, markdown styling, polish.
#[must_use]
pub fn standard_script(payload: &Payload, options: &DeskOptions) -> Vec<AnimationPhase> {
    let [intro, dock, markdown, polish] = &payload.style_fragments;
    let pauses = options.phase_pauses;
    let per_tick = options.chars_per_tick;
    let style = |text: &str, pause| {
        AnimationPhase::new(ids::STYLE_TEXT, text, options.speed)
            .mirrored()
            .with_chars_per_tick(per_tick)
            .with_pause_after(pause)
    };

    vec![
        AnimationPhase::new(ids::STYLE_TEXT, intro.as_str(), options.comment_speed())
            .mirrored()
            .with_chars_per_tick(per_tick)
            .with_pause_after(pauses[0]),
        style(dock.as_str(), pauses[1]).with_hook(PhaseHook::RevealDock),
        AnimationPhase::new(ids::WORK_TEXT, payload.work_text.as_str(), options.speed)
            .with_chars_per_tick(per_tick)
            .with_pause_after(pauses[2])
            .with_hook(PhaseHook::RenderWorkBox),
        style(markdown.as_str(), pauses[3]),
        style(polish.as_str(), pauses[4]),
    ]
}
