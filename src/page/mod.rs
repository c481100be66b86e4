//! The page: setup, the typing script, controls and window decoration.
//!
//! A [`Page`] owns a [`Document`], a [`Typewriter`] running the standard
//! script, and a [`WindowManager`]. The host drives it with
//! [`Page::advance`] (timers), [`Page::animation_frame`] (coalesced pointer
//! updates), and the input routing methods.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use typedesk::{DeskOptions, Page};
//!
//! let mut page = Page::standard(DeskOptions::default(), 1280, 800).unwrap();
//! page.start();
//! page.advance(Duration::from_millis(500));
//! assert!(!page.document().surface("style-text").unwrap().is_empty());
//! ```

pub mod document;
mod script;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::DeskOptions;
use crate::content::{Collaborators, Payload};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log, names};
use crate::geometry::{Point, Rect, Viewport};
use crate::schedule::Timeline;
use crate::typewriter::{PhaseHook, Session, StyleMirror, StyleSheet, Tick, TypeSink, Typewriter};
use crate::window::{ControlButton, Hit, SurfacePart, WindowManager};

pub use document::{Control, Document, FLIPPED, Surface, SurfaceContent, ids};
pub use script::standard_script;

/// Mount points setup cannot run without.
pub const REQUIRED_MOUNTS: [&str; 4] = [ids::STYLE_TAG, ids::STYLE_TEXT, ids::WORK_TEXT, ids::SKIP];

pub const PAUSE_LABEL: &str = "Pause ||";
pub const RESUME_LABEL: &str = "Resume >>";

const GIF_MARKUP: &str = "<div class=\"gif\">\n<h2>Need a break?</h2>\n\
<p>(imagine a looping gif here)</p>\n<p>Keep grinding!</p>\n</div>";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Task {
    Type,
    Decorate,
    DecorateAndRaise(String),
}

/// Writes typed chunks into the document.
struct DocumentSink<'a> {
    document: &'a mut Document,
    mirror: &'a mut StyleMirror,
}

impl TypeSink for DocumentSink<'_> {
    fn write(&mut self, target: &str, chunk: &str, mirror: bool) {
        let Self { document, mirror: highlighter } = self;
        let Some(surface) = document.surface_mut(target) else {
            warn!(target, "typed into a missing surface");
            emit_log(LogLevel::Warn, &format!("typed into missing surface #{target}"));
            return;
        };
        if mirror {
            surface.edit_markup(|markup| highlighter.push_str(markup, chunk));
        } else {
            surface.append_text(chunk);
        }
        surface.scroll_to_bottom();
        if mirror {
            if let Some(sheet) = document.style_tag_mut() {
                sheet.push_str(chunk);
            }
        }
    }
}

/// A running desk.
#[derive(Debug)]
pub struct Page {
    options: DeskOptions,
    document: Document,
    payload: Payload,
    collaborators: Collaborators,
    prefix: String,
    session: Session,
    typewriter: Typewriter,
    mirror: StyleMirror,
    timeline: Timeline<Task>,
    windows: WindowManager,
    started: bool,
    done: bool,
}

impl Page {
    /// The standard document and built-in content on a `width` x `height`
    /// viewport.
    pub fn standard(options: DeskOptions, width: i32, height: i32) -> Result<Self> {
        let viewport = Viewport::new(width, height, options.metrics.dock_height);
        Self::new(Document::standard(viewport), Payload::builtin(), options)
    }

    pub fn new(document: Document, payload: Payload, options: DeskOptions) -> Result<Self> {
        Self::with_collaborators(document, payload, options, Collaborators::default())
    }

    /// Set up a page: substitute the vendor prefix, check mount points,
    /// populate the header, inject the pre-styles, and decorate any surface
    /// that already has content.
    pub fn with_collaborators(
        mut document: Document,
        mut payload: Payload,
        options: DeskOptions,
        collaborators: Collaborators,
    ) -> Result<Self> {
        options.validate()?;
        if let Some(missing) = REQUIRED_MOUNTS.iter().find(|id| !document.has(id)) {
            return Err(Error::MissingMountPoint((*missing).to_string()));
        }
        let windows = window_slots(&document);
        if !options.z.holds(windows) {
            return Err(Error::InvalidConfig(format!(
                "z range {}..{} cannot stack {windows} windows",
                options.z.base, options.z.ceiling
            )));
        }

        let prefix = collaborators.prefix.detect_prefix();
        payload.apply_prefix(&prefix);
        if let Some(header) = document.surface_mut(ids::HEADER) {
            header.set_markup(payload.header_html.clone());
        }
        document.prepend_head_style(&payload.pre_styles);
        if options.dock_reveal {
            document.set_dock_visible(false);
        }

        let session = Session::new();
        let typewriter = Typewriter::new(
            standard_script(&payload, &options),
            session.clone(),
            options.pause_mode,
        );
        let windows = WindowManager::new(options.metrics, options.z, document.viewport());
        debug!(prefix = %prefix, viewport = ?document.viewport(), "page set up");

        let mut page = Self {
            options,
            document,
            payload,
            collaborators,
            prefix,
            session,
            typewriter,
            mirror: StyleMirror::new(),
            timeline: Timeline::new(),
            windows,
            started: false,
            done: false,
        };
        page.decorate_windows();
        Ok(page)
    }

    /// Queue the first tick of the script.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(phases = self.typewriter.phases().len(), "animation started");
        self.timeline.schedule(Duration::ZERO, Task::Type);
    }

    /// Run every timer due at or before `now` (time since the page started).
    /// Returns how many fired.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(due) = self.timeline.pop_due(now) {
            fired += 1;
            self.run(due.task);
        }
        self.timeline.settle(now);
        fired
    }

    /// Jump from deadline to deadline until no timers remain or `limit`
    /// timers have fired. Returns how many fired.
    pub fn run_until_idle(&mut self, limit: usize) -> usize {
        let mut fired = 0;
        while fired < limit {
            let Some(deadline) = self.timeline.next_deadline() else {
                break;
            };
            fired += self.advance(deadline);
        }
        fired
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Type => self.tick(),
            Task::Decorate => {
                self.decorate_windows();
            }
            Task::DecorateAndRaise(id) => {
                self.decorate_windows();
                self.windows.bring_to_front(&id);
            }
        }
    }

    fn tick(&mut self) {
        let mut sink = DocumentSink {
            document: &mut self.document,
            mirror: &mut self.mirror,
        };
        match self.typewriter.step(&mut sink) {
            Tick::Wait(delay) => self.timeline.schedule(delay, Task::Type),
            Tick::PhaseComplete { hook, rest, .. } => {
                self.run_hook(hook);
                self.timeline.schedule(rest, Task::Type);
            }
            Tick::Finished => self.finish(),
            Tick::Skipped => self.complete_instantly(),
        }
    }

    fn run_hook(&mut self, hook: PhaseHook) {
        match hook {
            PhaseHook::None => {}
            PhaseHook::RevealDock => self.reveal_dock(),
            PhaseHook::RenderWorkBox => self.create_work_box(),
        }
    }

    fn reveal_dock(&mut self) {
        if self.options.dock_reveal {
            self.document.set_dock_visible(true);
            emit_event(names::DOCK_REVEALED, "");
        }
    }

    /// Replace the typed portfolio text with its rendered markdown. Runs
    /// once; later calls are no-ops.
    pub fn create_work_box(&mut self) {
        if self
            .document
            .surface(ids::WORK_TEXT)
            .is_none_or(|work| work.has_class(FLIPPED))
        {
            return;
        }
        let rendered = self.collaborators.markdown.render(&self.payload.work_text);
        let linked = self.collaborators.links.rewrite_links(&rendered);
        if let Some(work) = self.document.surface_mut(ids::WORK_TEXT) {
            work.set_markup(format!("<div class=\"md\">{linked}</div>"));
            work.add_class(FLIPPED);
            work.set_scroll_top(0);
        }
    }

    fn finish(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        info!("animation done");
        emit_event(names::ANIMATION_DONE, "");
        self.timeline.schedule(self.options.decorate_delay, Task::Decorate);
    }

    /// Skip fallback: put the page in its end state in one pass.
    ///
    /// The style sheet gets every style fragment at once, the style surface
    /// gets the same highlighted markup typing would have produced, and the
    /// portfolio is rendered. Runs at most once per page.
    pub fn complete_instantly(&mut self) {
        if self.done {
            return;
        }
        self.done = true;

        let text = self.typewriter.mirrored_text();
        if let Some(sheet) = self.document.style_tag_mut() {
            sheet.set_overrides(format!("#work-text * {{ {}transition: none; }}", self.prefix));
            sheet.set_text(text.as_str());
        }
        self.mirror.reset();
        if let Some(surface) = self.document.surface_mut(ids::STYLE_TEXT) {
            surface.set_markup(StyleMirror::render(&text));
            surface.scroll_to_bottom();
        }
        self.reveal_dock();
        self.create_work_box();
        if let Some(work) = self.document.surface_mut(ids::WORK_TEXT) {
            work.set_scroll_top(0);
        }

        info!(chars = text.len(), "animation skipped");
        emit_event(names::ANIMATION_SKIPPED, "");
        self.timeline.schedule(self.options.decorate_delay, Task::Decorate);
    }

    /// Decorate every window surface with content. Already decorated
    /// surfaces are left alone.
    pub fn decorate_windows(&mut self) -> usize {
        let candidates: Vec<(String, Rect)> = self
            .document
            .surfaces()
            .iter()
            .filter(|s| s.is_window() && !s.is_empty())
            .map(|s| (s.id().to_string(), s.layout()))
            .collect();
        candidates
            .into_iter()
            .filter(|(id, rect)| self.windows.decorate(id, *rect).is_some())
            .count()
    }

    /// Activate a control by id. Returns whether it did anything.
    ///
    /// Hidden dock items ignore clicks; an id with no control is an error.
    pub fn click(&mut self, id: &str) -> Result<bool> {
        let Some(control) = self.document.control(id) else {
            emit_log(LogLevel::Warn, &format!("click on unknown control #{id}"));
            return Err(Error::UnknownSurface(id.to_string()));
        };
        if !control.is_visible() {
            return Ok(false);
        }
        match id {
            ids::SKIP => self.skip(),
            ids::PAUSE => {
                self.toggle_pause();
            }
            ids::REOPEN_TERMINAL => self.reopen(ids::STYLE_TEXT),
            ids::REOPEN_PORTFOLIO => self.reopen(ids::WORK_TEXT),
            ids::OPEN_GIF => return Ok(self.open_gif()),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Request the skip fallback. The next tick picks it up.
    pub fn skip(&mut self) {
        debug!(done = self.done, "skip clicked");
        self.session.skip.cancel();
    }

    /// Flip the pause flag and the pause control's label. Returns the new
    /// paused state.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.session.pause.toggle();
        if let Some(control) = self.document.control_mut(ids::PAUSE) {
            control.set_label(if paused { RESUME_LABEL } else { PAUSE_LABEL });
        }
        paused
    }

    /// Show a surface and raise it.
    pub fn reopen(&mut self, id: &str) {
        if let Some(surface) = self.document.surface_mut(id) {
            surface.set_hidden(false);
        }
        self.windows.show(id);
        self.windows.bring_to_front(id);
    }

    /// Create the gif window, or show the existing one.
    fn open_gif(&mut self) -> bool {
        if self.document.surface(ids::GIF_WINDOW).is_some() {
            self.reopen(ids::GIF_WINDOW);
            return true;
        }
        if !self.document.has(ids::CONTENT) {
            return false;
        }
        let g = self.options.gif_window;
        let rect = self
            .document
            .viewport()
            .place(g.left_frac, g.top_frac, g.width, g.height);
        let mut surface = Surface::window(ids::GIF_WINDOW, rect);
        surface.set_markup(GIF_MARKUP);
        self.document.add_surface(surface);
        self.timeline.schedule(
            self.options.decorate_delay,
            Task::DecorateAndRaise(ids::GIF_WINDOW.to_string()),
        );
        true
    }

    /// A user edit of the style surface: the edited text becomes the live
    /// style sheet.
    pub fn edit_style_text(&mut self, text: &str) {
        if let Some(sheet) = self.document.style_tag_mut() {
            sheet.set_text(text);
        }
        if let Some(surface) = self.document.surface_mut(ids::STYLE_TEXT) {
            surface.set_markup(StyleMirror::render(text));
        }
    }

    /// Route a pointer press to the window manager.
    pub fn pointer_down(&mut self, p: Point) -> Option<Hit> {
        let hit = self.windows.pointer_down(p)?;
        if hit.part == SurfacePart::Control(ControlButton::Close) {
            if let Some(surface) = self.document.surface_mut(&hit.surface) {
                surface.set_hidden(true);
            }
        }
        Some(hit)
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.windows.pointer_move(p)
    }

    pub fn pointer_up(&mut self) {
        self.windows.pointer_up();
    }

    /// Scroll the surface body under `p` by `lines`.
    pub fn wheel(&mut self, p: Point, lines: i32) -> bool {
        let target = match self.windows.hit_test(p) {
            Some(Hit {
                surface,
                part: SurfacePart::Body,
            }) => Some(surface),
            Some(_) => None,
            None => self
                .document
                .surfaces()
                .iter()
                .rev()
                .find(|s| {
                    !s.is_hidden()
                        && !s.is_empty()
                        && !self.windows.is_decorated(s.id())
                        && s.layout().contains(p)
                })
                .map(|s| s.id().to_string()),
        };
        target.is_some_and(|id| self.scroll(&id, lines))
    }

    /// Scroll a surface by `lines`. Hidden or missing surfaces are left alone.
    pub fn scroll(&mut self, id: &str, lines: i32) -> bool {
        match self.document.surface_mut(id) {
            Some(surface) if !surface.is_hidden() => {
                surface.scroll_by(lines);
                true
            }
            _ => false,
        }
    }

    /// Apply the pending drag or resize update.
    pub fn animation_frame(&mut self) -> bool {
        self.windows.animation_frame().is_some()
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, width: i32, height: i32) {
        let viewport = Viewport::new(width, height, self.options.metrics.dock_height);
        self.document.set_viewport(viewport);
        self.windows.set_viewport(viewport);
    }

    /// Whether a surface is shown.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.document.surface(id).is_some_and(|s| !s.is_hidden())
    }

    /// Where a surface is on screen: its managed frame when decorated,
    /// otherwise its layout.
    #[must_use]
    pub fn surface_rect(&self, id: &str) -> Option<Rect> {
        match self.windows.surface(id) {
            Some(window) => Some(window.frame(self.windows.metrics(), &self.windows.viewport())),
            None => self.document.surface(id).map(Surface::layout),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    #[must_use]
    pub fn options(&self) -> &DeskOptions {
        &self.options
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn style_sheet(&self) -> Option<&StyleSheet> {
        self.document.style_tag()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the script has ended, naturally or by skipping.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Windows the page may decorate: every window surface, plus the gif window
/// when it can still be opened.
fn window_slots(document: &Document) -> usize {
    let windows = document.surfaces().iter().filter(|s| s.is_window()).count();
    let gif = document.has(ids::OPEN_GIF)
        && document.has(ids::CONTENT)
        && document.surface(ids::GIF_WINDOW).is_none();
    windows + usize::from(gif)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZLimits;
    use crate::content::{LinkRewriter, MarkdownRenderer, PrefixDetector};
    use crate::typewriter::RunState;

    fn tiny_payload() -> Payload {
        Payload {
            header_html: "<b>hi</b>".to_string(),
            work_text: "# Work\n\nhttps://a.io\n".to_string(),
            style_fragments: [
                "/* hi */\n".to_string(),
                "#dock { color: red; }\n".to_string(),
                "p { -webkit-x: 1px; }\n".to_string(),
                "a { b: c; }\n".to_string(),
            ],
            pre_styles: "body { margin: 0; }".to_string(),
        }
    }

    fn fast() -> DeskOptions {
        DeskOptions::default()
            .with_speed(Duration::from_millis(1))
            .with_phase_pauses([Duration::from_millis(10); 5])
    }

    fn page() -> Page {
        let vp = Viewport::new(1280, 800, 80);
        Page::new(Document::standard(vp), tiny_payload(), fast()).unwrap()
    }

    #[test]
    fn test_missing_required_mount_point() {
        let vp = Viewport::new(1280, 800, 80);
        for id in REQUIRED_MOUNTS {
            let doc = Document::standard(vp).without(id);
            match Page::new(doc, tiny_payload(), fast()) {
                Err(Error::MissingMountPoint(missing)) => assert_eq!(missing, id),
                other => panic!("expected missing {id}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_z_range_must_fit_every_window() {
        let vp = Viewport::new(1280, 800, 80);
        let narrow = ZLimits {
            base: 10,
            ceiling: 13,
        };
        // two windows plus the gif window
        let err = Page::new(Document::standard(vp), tiny_payload(), fast().with_z_limits(narrow))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let doc = Document::standard(vp).without(ids::OPEN_GIF);
        let mut page = Page::new(doc, tiny_payload(), fast().with_z_limits(narrow)).unwrap();
        page.complete_instantly();
        page.run_until_idle(64);
        for _ in 0..10 {
            for id in [ids::STYLE_TEXT, ids::WORK_TEXT] {
                page.reopen(id);
                assert!(page.windows().surfaces().iter().all(|s| s.z() <= narrow.ceiling));
            }
        }
    }

    #[test]
    fn test_optional_mount_points_may_be_absent() {
        let vp = Viewport::new(1280, 800, 80);
        let doc = Document::standard(vp)
            .without(ids::PAUSE)
            .without(ids::HEADER)
            .without(ids::OPEN_GIF)
            .without(ids::CONTENT);
        let mut page = Page::new(doc, tiny_payload(), fast()).unwrap();
        assert!(matches!(page.click(ids::PAUSE), Err(Error::UnknownSurface(_))));
    }

    #[test]
    fn test_setup_populates_header_and_pre_styles() {
        let page = page();
        let header = page.document().surface(ids::HEADER).unwrap();
        assert_eq!(header.content(), &SurfaceContent::Markup("<b>hi</b>".to_string()));
        assert_eq!(page.document().head_styles()[0], "body { margin: 0; }");
        assert!(page.windows().surfaces().is_empty());
    }

    #[test]
    fn test_natural_run_reaches_end_state() {
        let mut page = page();
        page.start();
        page.run_until_idle(100_000);

        assert!(page.is_done());
        assert_eq!(page.typewriter().state(), RunState::Done);
        let sheet = page.style_sheet().unwrap();
        assert_eq!(sheet.text(), page.payload().style_text());
        assert_eq!(sheet.overrides(), "");
        let work = page.document().surface(ids::WORK_TEXT).unwrap();
        assert!(work.has_class(FLIPPED));
        let SurfaceContent::Markup(html) = work.content() else {
            panic!("work box not rendered");
        };
        assert!(html.starts_with("<div class=\"md\"><h1>Work</h1>"));
        assert!(html.contains("<a href=\"https://a.io\" target=\"_blank\">"));
        assert!(page.windows().is_decorated(ids::STYLE_TEXT));
        assert!(page.windows().is_decorated(ids::WORK_TEXT));
        assert!(!page.windows().is_decorated(ids::HEADER));
    }

    #[test]
    fn test_skip_matches_natural_completion() {
        let mut natural = page();
        natural.start();
        natural.run_until_idle(100_000);

        let mut skipped = page();
        skipped.start();
        skipped.advance(Duration::from_millis(40));
        assert!(!skipped.is_done());
        skipped.click(ids::SKIP).unwrap();
        skipped.run_until_idle(100);

        assert_eq!(skipped.typewriter().state(), RunState::Skipped);
        let a = natural.style_sheet().unwrap();
        let b = skipped.style_sheet().unwrap();
        assert_eq!(a.text(), b.text());
        assert_eq!(b.overrides(), "#work-text * { -webkit-transition: none; }");
        for id in [ids::STYLE_TEXT, ids::WORK_TEXT] {
            assert_eq!(
                natural.document().surface(id).unwrap().content(),
                skipped.document().surface(id).unwrap().content(),
                "{id} differs"
            );
        }
        assert!(skipped.windows().is_decorated(ids::WORK_TEXT));
    }

    #[test]
    fn test_skip_while_paused() {
        let mut page = page();
        page.start();
        page.advance(Duration::from_millis(20));
        assert!(page.click(ids::PAUSE).unwrap());
        assert_eq!(page.document().control(ids::PAUSE).unwrap().label(), RESUME_LABEL);
        page.advance(Duration::from_millis(500));
        assert!(!page.is_done());

        page.click(ids::SKIP).unwrap();
        page.advance(Duration::from_millis(600));
        assert!(page.is_done());
        page.toggle_pause();
        assert_eq!(page.document().control(ids::PAUSE).unwrap().label(), PAUSE_LABEL);
    }

    #[test]
    fn test_decoration_is_deferred() {
        let mut page = page();
        page.click(ids::SKIP).unwrap();
        page.start();
        page.advance(Duration::ZERO);
        assert!(page.is_done());
        assert!(!page.windows().is_decorated(ids::STYLE_TEXT));
        page.advance(Duration::from_millis(99));
        assert!(!page.windows().is_decorated(ids::STYLE_TEXT));
        page.advance(Duration::from_millis(100));
        assert!(page.windows().is_decorated(ids::STYLE_TEXT));
    }

    #[test]
    fn test_dock_reveal() {
        let vp = Viewport::new(1280, 800, 80);
        let mut page = Page::new(
            Document::standard(vp),
            tiny_payload(),
            fast().with_dock_reveal(true),
        )
        .unwrap();
        assert!(!page.document().control(ids::OPEN_GIF).unwrap().is_visible());
        assert!(!page.click(ids::OPEN_GIF).unwrap());
        page.start();
        page.run_until_idle(100_000);
        assert!(page.document().control(ids::OPEN_GIF).unwrap().is_visible());
    }

    #[test]
    fn test_gif_window_opens_once() {
        let mut page = page();
        assert!(page.click(ids::OPEN_GIF).unwrap());
        let rect = page.document().surface(ids::GIF_WINDOW).unwrap().layout();
        assert_eq!(rect, Rect::new(320, 160, 550, 450));
        page.advance(Duration::from_millis(100));
        assert!(page.windows().is_decorated(ids::GIF_WINDOW));
        let z = page.windows().surface(ids::GIF_WINDOW).unwrap().z();
        assert!(z > page.options().z.base);

        let close = page
            .windows()
            .surface(ids::GIF_WINDOW)
            .unwrap()
            .control_rect(
                ControlButton::Close,
                page.windows().metrics(),
                &page.windows().viewport(),
            )
            .origin();
        page.pointer_down(close);
        assert!(!page.is_visible(ids::GIF_WINDOW));
        assert!(page.click(ids::OPEN_GIF).unwrap());
        assert!(page.is_visible(ids::GIF_WINDOW));
        assert_eq!(
            page.document()
                .surfaces()
                .iter()
                .filter(|s| s.id() == ids::GIF_WINDOW)
                .count(),
            1
        );
    }

    #[test]
    fn test_edit_style_text_replaces_sheet() {
        let mut page = page();
        page.edit_style_text("#work-text { color: #ffffff; }");
        assert_eq!(
            page.style_sheet().unwrap().lookup("#work-text", "color"),
            Some("#ffffff".to_string())
        );
    }

    struct Upper;
    impl MarkdownRenderer for Upper {
        fn render(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }
    struct NoLinks;
    impl LinkRewriter for NoLinks {
        fn rewrite_links(&self, html: &str) -> String {
            html.to_string()
        }
    }
    struct Moz;
    impl PrefixDetector for Moz {
        fn detect_prefix(&self) -> String {
            "-moz-".to_string()
        }
    }

    #[test]
    fn test_custom_collaborators() {
        let vp = Viewport::new(1280, 800, 80);
        let mut page = Page::with_collaborators(
            Document::standard(vp),
            tiny_payload(),
            fast(),
            Collaborators {
                markdown: Box::new(Upper),
                links: Box::new(NoLinks),
                prefix: Box::new(Moz),
            },
        )
        .unwrap();
        assert_eq!(page.prefix(), "-moz-");
        assert!(page.payload().style_fragments[2].contains("-moz-x"));
        page.complete_instantly();
        let work = page.document().surface(ids::WORK_TEXT).unwrap();
        assert_eq!(
            work.content(),
            &SurfaceContent::Markup("<div class=\"md\"># WORK\n\nHTTPS://A.IO\n</div>".to_string())
        );
        assert_eq!(
            page.style_sheet().unwrap().overrides(),
            "#work-text * { -moz-transition: none; }"
        );
    }

    #[test]
    fn test_wheel_scrolls_body() {
        let mut page = page();
        page.complete_instantly();
        page.advance(Duration::from_millis(100));
        let rect = page.surface_rect(ids::WORK_TEXT).unwrap();
        let inside = Point::new(rect.left + 20, rect.top + 60);
        if let Some(work) = page.document.surface_mut(ids::WORK_TEXT) {
            work.set_markup("a\nb\nc\nd\n");
        }
        assert!(page.wheel(inside, 2));
        assert_eq!(page.document().surface(ids::WORK_TEXT).unwrap().scroll_top(), 2);
    }

    #[test]
    fn test_scroll_skips_hidden_surfaces() {
        let mut page = page();
        page.complete_instantly();
        page.advance(Duration::from_millis(100));
        assert!(page.scroll(ids::STYLE_TEXT, -1));
        assert!(!page.scroll("nope", 1));

        let close = page
            .windows()
            .surface(ids::STYLE_TEXT)
            .unwrap()
            .control_rect(
                ControlButton::Close,
                page.windows().metrics(),
                &page.windows().viewport(),
            )
            .origin();
        page.pointer_down(close);
        assert!(!page.is_visible(ids::STYLE_TEXT));
        assert!(!page.scroll(ids::STYLE_TEXT, 1));
    }
}
