//! Painting a page into a canvas.
//!
//! Paint order: page background, undecorated surfaces in document order,
//! decorated surfaces by z-order, fixed surfaces (the header), then the
//! dock. Colours come from the live style sheet, so the desk takes on its
//! look as the CSS is typed.

use unicode_segmentation::UnicodeSegmentation;

use crate::color::Rgb;
use crate::geometry::{Point, Rect};
use crate::page::{Control, Page, Surface, SurfaceContent, ids};
use crate::renderer::canvas::{Canvas, CellStyle, text_width};
use crate::renderer::markup::{Line, Role, Span, Whitespace, styled_lines};
use crate::typewriter::StyleSheet;
use crate::window::{ControlButton, WindowSurface};

const DEFAULT_FG: Rgb = Rgb::new(0xc0, 0xc0, 0xc0);
const DEFAULT_BORDER: Rgb = Rgb::new(0x5c, 0x5f, 0x66);
const DOCK_SEPARATOR: &str = "   ";

/// A clickable region and the control it activates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hotspot {
    pub id: String,
    pub rect: Rect,
}

/// Id of the topmost hotspot under `p`.
#[must_use]
pub fn hotspot_at(hotspots: &[Hotspot], p: Point) -> Option<&str> {
    hotspots
        .iter()
        .rev()
        .find(|h| h.rect.contains(p))
        .map(|h| h.id.as_str())
}

/// Colours resolved from the live style sheet.
#[derive(Clone, Copy, Debug)]
pub struct Palette<'a> {
    sheet: Option<&'a StyleSheet>,
    page: CellStyle,
}

impl<'a> Palette<'a> {
    #[must_use]
    pub fn new(sheet: Option<&'a StyleSheet>) -> Self {
        let mut palette = Self {
            sheet,
            page: CellStyle::new(DEFAULT_FG, Rgb::BLACK),
        };
        if let Some(bg) = palette.background(&["html", "body"]) {
            palette.page.bg = bg;
        }
        if let Some(fg) = palette.color(&["pre", "body", "html"], "color") {
            palette.page.fg = fg;
        }
        palette
    }

    /// The page's own colours.
    #[must_use]
    pub fn page(&self) -> CellStyle {
        self.page
    }

    /// First parseable `property` colour among `selectors`.
    #[must_use]
    pub fn color(&self, selectors: &[&str], property: &str) -> Option<Rgb> {
        let sheet = self.sheet?;
        selectors
            .iter()
            .find_map(|sel| sheet.lookup(sel, property).and_then(|v| Rgb::from_css(&v)))
    }

    fn background(&self, selectors: &[&str]) -> Option<Rgb> {
        self.color(selectors, "background")
            .or_else(|| self.color(selectors, "background-color"))
    }

    /// Colours for the element with this id.
    #[must_use]
    pub fn element(&self, id: &str) -> CellStyle {
        let selector = format!("#{id}");
        let mut style = self.page;
        if let Some(bg) = self.background(&[&selector]) {
            style.bg = bg;
        }
        if let Some(fg) = self.color(&[&selector], "color") {
            style.fg = fg;
        }
        style
    }

    fn border(&self, id: &str, base: CellStyle) -> CellStyle {
        let selector = format!("#{id}");
        let fg = self
            .color(&[&selector], "border")
            .or_else(|| self.color(&[&selector], "border-color"))
            .unwrap_or(DEFAULT_BORDER);
        CellStyle::new(fg, base.bg)
    }

    /// Style for a run of `role` inside the element `id`.
    #[must_use]
    pub fn span(&self, id: &str, base: CellStyle, role: Role) -> CellStyle {
        let mut style = base;
        if let Some(sel) = role.selector() {
            let scoped = format!("#{id} {sel}");
            let md = format!(".md {sel}");
            if let Some(fg) = self.color(&[&scoped, &md, sel], "color") {
                style.fg = fg;
            }
        }
        match role {
            Role::Comment => style.italic(),
            Role::Heading => style.bold(),
            Role::Link => style.underline(),
            Role::Code => {
                if let Some(bg) = self.background(&[".md code", "code"]) {
                    style.bg = bg;
                }
                style
            }
            _ => style,
        }
    }
}

/// Paint `page` and return the hotspots of its visible controls.
pub fn paint(page: &Page, canvas: &mut Canvas) -> Vec<Hotspot> {
    let palette = Palette::new(page.style_sheet());
    let document = page.document();
    let windows = page.windows();
    canvas.clear(palette.page().bg);

    let mut painter = Painter {
        canvas,
        palette,
        controls: document.controls(),
        hotspots: Vec::new(),
        anchored: Vec::new(),
    };

    for surface in document.surfaces() {
        if surface.is_window()
            && !surface.is_hidden()
            && !surface.is_empty()
            && !windows.is_decorated(surface.id())
        {
            let style = painter.palette.element(surface.id());
            painter.canvas.fill_rect(surface.layout(), style.bg);
            painter.body(surface, surface.layout(), style);
        }
    }

    for window in windows.stacking() {
        painter.window(window, document.surface(window.id()), page);
    }

    for surface in document.surfaces() {
        if !surface.is_window() && !surface.is_hidden() && !surface.is_empty() {
            let style = painter.palette.element(surface.id());
            painter.canvas.fill_rect(surface.layout(), style.bg);
            painter.body(surface, surface.layout(), style);
        }
    }

    let viewport = document.viewport();
    painter.dock(Rect::new(
        0,
        viewport.usable_height(),
        viewport.width,
        viewport.dock_height,
    ));
    painter.hotspots
}

struct Painter<'c, 'd> {
    canvas: &'c mut Canvas,
    palette: Palette<'d>,
    controls: &'d [Control],
    hotspots: Vec<Hotspot>,
    /// Controls already drawn where the markup anchors them.
    anchored: Vec<String>,
}

impl Painter<'_, '_> {
    fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id() == id)
    }

    fn window(&mut self, window: &WindowSurface, surface: Option<&Surface>, page: &Page) {
        let metrics = page.windows().metrics();
        let viewport = page.windows().viewport();
        let frame = window.frame(metrics, &viewport);
        let style = self.palette.element(window.id());
        self.canvas.fill_rect(frame, style.bg);
        if frame.height >= 2 {
            self.canvas.draw_border(frame, self.palette.border(window.id(), style));
        }

        let title = window.title_rect(metrics, &viewport);
        for button in ControlButton::ALL {
            let rect = window.control_rect(button, metrics, &viewport);
            let glyph_style = CellStyle::new(button_color(button), style.bg);
            self.canvas.draw_text(rect.left, rect.top, "●", glyph_style, rect);
        }
        let controls_end = window
            .control_rect(ControlButton::Maximize, metrics, &viewport)
            .right();
        let label = format!(" {} ", window.id());
        let free = title.right() - controls_end;
        let label_width = text_width(&label) as i32;
        if free > label_width {
            let x = controls_end + (free - label_width) / 2;
            self.canvas
                .draw_text(x, title.top, &label, style.bold(), title);
        }

        let top = title.bottom().max(frame.top + 1);
        let body = Rect::new(
            frame.left + 1,
            top,
            frame.width - 2,
            frame.bottom() - 1 - top,
        );
        if let Some(surface) = surface {
            if body.width > 0 && body.height > 0 {
                self.body(surface, body, style);
            }
        }
    }

    fn body(&mut self, surface: &Surface, area: Rect, style: CellStyle) {
        let Ok(width) = usize::try_from(area.width) else {
            return;
        };
        let Ok(height) = usize::try_from(area.height) else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }

        let lines = self.labelled(content_lines(surface));
        let mut rows = Vec::new();
        let mut first_row_of_line = Vec::with_capacity(lines.len());
        for line in &lines {
            first_row_of_line.push(rows.len());
            rows.extend(wrap(line, width));
        }
        let anchor_row = first_row_of_line
            .get(surface.scroll_top())
            .copied()
            .unwrap_or(rows.len());
        let start = anchor_row.min(rows.len().saturating_sub(height));

        for (offset, row) in rows.iter().skip(start).take(height).enumerate() {
            let y = area.top + offset as i32;
            let mut x = area.left;
            for span in row {
                let span_style = self.palette.span(surface.id(), style, span.role);
                let advanced = self.canvas.draw_text(x, y, &span.text, span_style, area);
                if let Some(id) = &span.anchor {
                    if self.control(id).is_some() {
                        self.hotspots.push(Hotspot {
                            id: id.clone(),
                            rect: Rect::new(x, y, advanced, 1),
                        });
                        self.anchored.push(id.clone());
                    }
                }
                x += advanced;
            }
        }
    }

    /// Swap anchored control text for the control's live label; drop
    /// anchors to hidden controls.
    fn labelled(&self, mut lines: Vec<Line>) -> Vec<Line> {
        for line in &mut lines {
            line.retain_mut(|span| {
                let Some(control) = span.anchor.as_deref().and_then(|id| self.control(id)) else {
                    return true;
                };
                if !control.is_visible() {
                    return false;
                }
                control.label().clone_into(&mut span.text);
                true
            });
        }
        lines
    }

    fn dock(&mut self, row: Rect) {
        if row.height <= 0 {
            return;
        }
        let style = self.palette.element("dock");
        self.canvas.fill_rect(row, style.bg);
        let item_style = self.palette.span("dock", style, Role::Link);
        let y = row.top + (row.height - 1) / 2;

        let items: Vec<&Control> = self
            .controls
            .iter()
            .filter(|c| c.is_dock_item() && c.is_visible())
            .collect();
        let total: i32 = items.iter().map(|c| text_width(c.label()) as i32).sum::<i32>()
            + DOCK_SEPARATOR.len() as i32 * (items.len() as i32 - 1).max(0);
        let mut x = row.left + ((row.width - total) / 2).max(0);
        for item in items {
            let advanced = self.canvas.draw_text(x, y, item.label(), item_style, row);
            self.hotspots.push(Hotspot {
                id: item.id().to_string(),
                rect: Rect::new(x, y, advanced, 1),
            });
            x += advanced + DOCK_SEPARATOR.len() as i32;
        }

        // page controls no markup placed: right end of the dock
        let loose: Vec<&Control> = self
            .controls
            .iter()
            .filter(|c| !c.is_dock_item() && c.is_visible() && !self.anchored.iter().any(|a| a == c.id()))
            .collect();
        let mut x = row.right();
        for control in loose.into_iter().rev() {
            let label = format!("[{}]", control.label());
            x -= text_width(&label) as i32 + 1;
            let advanced = self.canvas.draw_text(x, y, &label, style.bold(), row);
            self.hotspots.push(Hotspot {
                id: control.id().to_string(),
                rect: Rect::new(x, y, advanced, 1),
            });
        }
    }
}

fn button_color(button: ControlButton) -> Rgb {
    match button {
        ControlButton::Close => Rgb::new(0xff, 0x5f, 0x56),
        ControlButton::Minimize => Rgb::new(0xff, 0xbd, 0x2e),
        ControlButton::Maximize => Rgb::new(0x27, 0xc9, 0x3f),
    }
}

/// A surface's content as styled lines.
fn content_lines(surface: &Surface) -> Vec<Line> {
    match surface.content() {
        SurfaceContent::Plain(rope) => rope
            .lines()
            .map(|line| {
                let text = line.to_string();
                let text = text.trim_end_matches(['\n', '\r']);
                vec![Span {
                    text: text.to_string(),
                    role: Role::Plain,
                    anchor: None,
                }]
            })
            .collect(),
        SurfaceContent::Markup(markup) => {
            let mode = if surface.id() == ids::STYLE_TEXT {
                Whitespace::Pre
            } else {
                Whitespace::Normal
            };
            styled_lines(markup, mode)
        }
    }
}

/// Break `line` into rows at most `width` columns wide.
fn wrap(line: &Line, width: usize) -> Vec<Line> {
    let mut rows: Vec<Line> = vec![Vec::new()];
    let mut used = 0;
    for span in line {
        for grapheme in span.text.graphemes(true) {
            let w = text_width(grapheme);
            if used + w > width && used > 0 {
                rows.push(Vec::new());
                used = 0;
            }
            let Some(row) = rows.last_mut() else {
                continue;
            };
            match row.last_mut() {
                Some(last) if last.role == span.role && last.anchor == span.anchor => {
                    last.text.push_str(grapheme);
                }
                _ => row.push(Span {
                    text: grapheme.to_string(),
                    role: span.role,
                    anchor: span.anchor.clone(),
                }),
            }
            used += w;
        }
    }
    rows
}
