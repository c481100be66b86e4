//! The element tree the page writes into.
//!
//! A [`Document`] is the headless stand-in for a web page: display
//! surfaces with layout rectangles and content, clickable controls, the
//! live style element, and injected head styles. Everything is looked up by
//! element id.

use ropey::Rope;

use crate::geometry::{Rect, Viewport};
use crate::typewriter::StyleSheet;

/// Element ids the page looks up.
pub mod ids {
    pub const STYLE_TAG: &str = "style-tag";
    pub const STYLE_TEXT: &str = "style-text";
    pub const WORK_TEXT: &str = "work-text";
    pub const SKIP: &str = "skip-animation";
    pub const PAUSE: &str = "pause-resume";
    pub const HEADER: &str = "header";
    pub const REOPEN_TERMINAL: &str = "reopen-terminal";
    pub const REOPEN_PORTFOLIO: &str = "reopen-portfolio";
    pub const OPEN_GIF: &str = "open-gif";
    pub const CONTENT: &str = "content";
    pub const GIF_WINDOW: &str = "gif-window";
}

/// Class added to the portfolio surface once its markdown is rendered.
pub const FLIPPED: &str = "flipped";

/// Text or markup held by a surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceContent {
    Plain(Rope),
    Markup(String),
}

impl Default for SurfaceContent {
    fn default() -> Self {
        Self::Plain(Rope::new())
    }
}

/// A display surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    id: String,
    layout: Rect,
    content: SurfaceContent,
    classes: Vec<String>,
    hidden: bool,
    scroll_top: usize,
    window: bool,
}

impl Surface {
    /// A surface that becomes a window once it has content.
    #[must_use]
    pub fn window(id: &str, layout: Rect) -> Self {
        Self {
            id: id.to_string(),
            layout,
            content: SurfaceContent::default(),
            classes: Vec::new(),
            hidden: false,
            scroll_top: 0,
            window: true,
        }
    }

    /// A surface that is never decorated.
    #[must_use]
    pub fn fixed(id: &str, layout: Rect) -> Self {
        Self {
            window: false,
            ..Self::window(id, layout)
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position from layout, before any window management.
    #[must_use]
    pub fn layout(&self) -> Rect {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Rect) {
        self.layout = layout;
    }

    #[must_use]
    pub fn is_window(&self) -> bool {
        self.window
    }

    #[must_use]
    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.content {
            SurfaceContent::Plain(rope) => rope.len_chars() == 0,
            SurfaceContent::Markup(markup) => markup.is_empty(),
        }
    }

    /// Number of lines of content.
    #[must_use]
    pub fn line_count(&self) -> usize {
        match &self.content {
            SurfaceContent::Plain(rope) => rope.len_lines(),
            SurfaceContent::Markup(markup) => markup.lines().count().max(1),
        }
    }

    /// Append plain text. Markup content is escaped onto the end.
    pub fn append_text(&mut self, text: &str) {
        match &mut self.content {
            SurfaceContent::Plain(rope) => {
                let end = rope.len_chars();
                rope.insert(end, text);
            }
            SurfaceContent::Markup(markup) => {
                for ch in text.chars() {
                    match ch {
                        '<' => markup.push_str("&lt;"),
                        '>' => markup.push_str("&gt;"),
                        '&' => markup.push_str("&amp;"),
                        _ => markup.push(ch),
                    }
                }
            }
        }
    }

    /// Edit the markup in place, converting plain text to markup first.
    pub fn edit_markup<R>(&mut self, edit: impl FnOnce(&mut String) -> R) -> R {
        let mut markup = match std::mem::take(&mut self.content) {
            SurfaceContent::Plain(rope) => rope.to_string(),
            SurfaceContent::Markup(markup) => markup,
        };
        let out = edit(&mut markup);
        self.content = SurfaceContent::Markup(markup);
        out
    }

    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.content = SurfaceContent::Markup(markup.into());
    }

    pub fn set_text(&mut self, text: &str) {
        self.content = SurfaceContent::Plain(Rope::from_str(text));
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// First visible line.
    #[must_use]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, line: usize) {
        self.scroll_top = line.min(self.line_count().saturating_sub(1));
    }

    pub fn scroll_by(&mut self, lines: i32) {
        let top = if lines < 0 {
            self.scroll_top.saturating_sub(lines.unsigned_abs() as usize)
        } else {
            self.scroll_top.saturating_add(lines as usize)
        };
        self.set_scroll_top(top);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.set_scroll_top(usize::MAX);
    }
}

/// A clickable control (link or dock item).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    id: String,
    label: String,
    visible: bool,
    dock: bool,
}

impl Control {
    #[must_use]
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            visible: true,
            dock: false,
        }
    }

    /// A control that lives in the dock.
    #[must_use]
    pub fn dock_item(id: &str, label: &str) -> Self {
        Self {
            dock: true,
            ..Self::new(id, label)
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        label.clone_into(&mut self.label);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn is_dock_item(&self) -> bool {
        self.dock
    }
}

/// The page's elements.
#[derive(Clone, Debug)]
pub struct Document {
    viewport: Viewport,
    surfaces: Vec<Surface>,
    controls: Vec<Control>,
    style_tag: Option<StyleSheet>,
    containers: Vec<String>,
    head_styles: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            surfaces: Vec::new(),
            controls: Vec::new(),
            style_tag: None,
            containers: Vec::new(),
            head_styles: Vec::new(),
        }
    }

    /// The standard desk: a terminal on the left, the portfolio on the
    /// right, a footer above the dock, and every control wired.
    #[must_use]
    pub fn standard(viewport: Viewport) -> Self {
        let usable = viewport.usable_height();
        let half = (viewport.width * 46 / 100).max(1);
        let tall = (usable * 60 / 100).max(1);
        let top = viewport.height * 5 / 100;
        Self::new(viewport)
            .with_style_tag()
            .with_container(ids::CONTENT)
            .with_surface(Surface::window(
                ids::STYLE_TEXT,
                Rect::new(viewport.width * 2 / 100, top, half, tall),
            ))
            .with_surface(Surface::window(
                ids::WORK_TEXT,
                Rect::new(viewport.width * 52 / 100, top, half, tall),
            ))
            .with_surface(Surface::fixed(
                ids::HEADER,
                Rect::new(0, usable - 1, viewport.width, 1),
            ))
            .with_control(Control::new(ids::SKIP, "Skip"))
            .with_control(Control::new(ids::PAUSE, "Pause ||"))
            .with_control(Control::dock_item(ids::REOPEN_TERMINAL, "Terminal"))
            .with_control(Control::dock_item(ids::REOPEN_PORTFOLIO, "Portfolio"))
            .with_control(Control::dock_item(ids::OPEN_GIF, "Need a break?"))
    }

    #[must_use]
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.add_surface(surface);
        self
    }

    #[must_use]
    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    #[must_use]
    pub fn with_style_tag(mut self) -> Self {
        self.style_tag = Some(StyleSheet::new());
        self
    }

    #[must_use]
    pub fn with_container(mut self, id: &str) -> Self {
        self.containers.push(id.to_string());
        self
    }

    /// Remove an element by id.
    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.surfaces.retain(|s| s.id != id);
        self.controls.retain(|c| c.id != id);
        self.containers.retain(|c| c != id);
        if id == ids::STYLE_TAG {
            self.style_tag = None;
        }
        self
    }

    /// Whether any element carries `id`.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        (id == ids::STYLE_TAG && self.style_tag.is_some())
            || self.surface(id).is_some()
            || self.control(id).is_some()
            || self.containers.iter().any(|c| c == id)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn add_surface(&mut self, surface: Surface) {
        self.surfaces.retain(|s| s.id != surface.id);
        self.surfaces.push(surface);
    }

    /// Surfaces in document order.
    #[must_use]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    #[must_use]
    pub fn surface(&self, id: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    pub fn surface_mut(&mut self, id: &str) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|s| s.id == id)
    }

    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    #[must_use]
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn control_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Show or hide every dock item.
    pub fn set_dock_visible(&mut self, visible: bool) {
        for control in self.controls.iter_mut().filter(|c| c.dock) {
            control.visible = visible;
        }
    }

    #[must_use]
    pub fn style_tag(&self) -> Option<&StyleSheet> {
        self.style_tag.as_ref()
    }

    pub fn style_tag_mut(&mut self) -> Option<&mut StyleSheet> {
        self.style_tag.as_mut()
    }

    /// Insert a style block ahead of every other head style.
    pub fn prepend_head_style(&mut self, css: &str) {
        self.head_styles.insert(0, css.to_string());
    }

    #[must_use]
    pub fn head_styles(&self) -> &[String] {
        &self.head_styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(100, 40, 1)
    }

    #[test]
    fn test_standard_has_every_mount_point() {
        let doc = Document::standard(vp());
        for id in [
            ids::STYLE_TAG,
            ids::STYLE_TEXT,
            ids::WORK_TEXT,
            ids::SKIP,
            ids::PAUSE,
            ids::HEADER,
            ids::REOPEN_TERMINAL,
            ids::REOPEN_PORTFOLIO,
            ids::OPEN_GIF,
            ids::CONTENT,
        ] {
            assert!(doc.has(id), "missing {id}");
        }
        assert!(!doc.has(ids::GIF_WINDOW));
        let doc = doc.without(ids::STYLE_TAG);
        assert!(!doc.has(ids::STYLE_TAG));
    }

    #[test]
    fn test_plain_append_and_lines() {
        let mut s = Surface::window("w", Rect::new(0, 0, 10, 5));
        assert!(s.is_empty());
        s.append_text("one\ntwo\n");
        s.append_text("three");
        assert_eq!(s.line_count(), 3);
        s.scroll_to_bottom();
        assert_eq!(s.scroll_top(), 2);
        s.scroll_by(-5);
        assert_eq!(s.scroll_top(), 0);
    }

    #[test]
    fn test_markup_conversion_keeps_text() {
        let mut s = Surface::window("w", Rect::default());
        s.append_text("a<b");
        s.edit_markup(|m| m.push_str("<span>c</span>"));
        assert_eq!(
            s.content(),
            &SurfaceContent::Markup("a<b<span>c</span>".to_string())
        );
        s.append_text("<");
        assert!(matches!(s.content(), SurfaceContent::Markup(m) if m.ends_with("&lt;")));
    }

    #[test]
    fn test_classes_are_unique() {
        let mut s = Surface::fixed("h", Rect::default());
        s.add_class(FLIPPED);
        s.add_class(FLIPPED);
        assert_eq!(s.classes().len(), 1);
        assert!(!s.is_window());
    }
}
