//! Double-buffered cell rendering for the terminal frontend.
//!
//! Each frame the page is painted into a fresh back [`Canvas`]; the
//! [`Renderer`] diffs it against the last presented canvas and writes only
//! the changed cells.

mod canvas;
mod markup;
mod paint;

pub use canvas::{Canvas, Cell, CellStyle, text_width};
pub use markup::{Line, Role, Span, Whitespace, decode_entities, styled_lines};
pub use paint::{Hotspot, Palette, hotspot_at, paint};

use std::io::{self, Write};

use tracing::trace;

use crate::ansi::{self, AnsiWriter};
use crate::page::Page;

/// Rendering statistics for the last presented frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames: u64,
    pub cells_updated: usize,
    pub full_redraw: bool,
}

/// Renderer options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererOptions {
    /// Wrap each frame in synchronized-update sequences.
    pub sync_output: bool,
    /// Share of changed cells above which the whole screen is rewritten.
    pub full_redraw_percent: u8,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            sync_output: true,
            full_redraw_percent: 60,
        }
    }
}

/// Presents canvases to a terminal writer.
pub struct Renderer<W: Write> {
    out: W,
    front: Canvas,
    options: RendererOptions,
    force_redraw: bool,
    hotspots: Vec<Hotspot>,
    stats: RenderStats,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, width: u32, height: u32) -> Self {
        Self::with_options(out, width, height, RendererOptions::default())
    }

    pub fn with_options(out: W, width: u32, height: u32, options: RendererOptions) -> Self {
        Self {
            out,
            front: Canvas::new(width, height),
            options,
            force_redraw: true,
            hotspots: Vec::new(),
            stats: RenderStats::default(),
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.front.size()
    }

    /// The last presented frame.
    #[must_use]
    pub fn front(&self) -> &Canvas {
        &self.front
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Clickable controls of the last presented frame.
    #[must_use]
    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Start over at a new size; the next frame is written in full.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.front = Canvas::new(width, height);
        self.force_redraw = true;
    }

    /// Paint `page` and present it.
    pub fn render(&mut self, page: &Page) -> io::Result<()> {
        let (width, height) = self.front.size();
        let mut back = Canvas::new(width, height);
        self.hotspots = paint(page, &mut back);
        self.present(back)
    }

    /// Write the cells of `back` that differ from the last frame.
    pub fn present(&mut self, back: Canvas) -> io::Result<()> {
        let changed = back.diff(&self.front);
        let total = (back.width() as usize * back.height() as usize).max(1);
        let full = self.force_redraw
            || changed.len() * 100 / total >= usize::from(self.options.full_redraw_percent);

        let mut writer = AnsiWriter::new(&mut self.out);
        if self.options.sync_output {
            writer.write_str(ansi::sync::BEGIN);
        }
        if full {
            writer.write_str(ansi::RESET);
            writer.write_str(ansi::CLEAR_SCREEN);
            for y in 0..back.height() {
                for x in 0..back.width() {
                    if let Some(cell) = back.get(x, y) {
                        writer.write_cell_at(y, x, cell);
                    }
                }
            }
        } else {
            for &(x, y) in &changed {
                if let Some(cell) = back.get(x, y) {
                    writer.write_cell_at(y, x, cell);
                }
            }
        }
        writer.reset();
        if self.options.sync_output {
            writer.write_str(ansi::sync::END);
        }
        writer.flush()?;

        self.stats = RenderStats {
            frames: self.stats.frames + 1,
            cells_updated: if full { total } else { changed.len() },
            full_redraw: full,
        };
        trace!(cells = self.stats.cells_updated, full, "frame presented");
        self.front = back;
        self.force_redraw = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::geometry::Rect;

    fn options() -> RendererOptions {
        RendererOptions {
            sync_output: false,
            full_redraw_percent: 60,
        }
    }

    #[test]
    fn test_first_frame_is_full() {
        let mut renderer = Renderer::with_options(Vec::new(), 4, 2, options());
        renderer.present(Canvas::new(4, 2)).unwrap();
        assert!(renderer.stats().full_redraw);
        assert_eq!(renderer.stats().cells_updated, 8);
    }

    #[test]
    fn test_second_frame_writes_only_changes() {
        let mut renderer = Renderer::with_options(Vec::new(), 10, 4, options());
        renderer.present(Canvas::new(10, 4)).unwrap();

        let mut next = Canvas::new(10, 4);
        next.draw_text(2, 1, "hi", CellStyle::new(Rgb::WHITE, Rgb::BLACK), next.bounds());
        renderer.present(next).unwrap();
        assert!(!renderer.stats().full_redraw);
        assert_eq!(renderer.stats().cells_updated, 2);
        assert_eq!(renderer.front().row_text(1), "  hi      ");
        assert_eq!(renderer.stats().frames, 2);
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = Renderer::with_options(Vec::new(), 4, 2, options());
        renderer.present(Canvas::new(4, 2)).unwrap();
        renderer.resize(6, 3);
        let mut canvas = Canvas::new(6, 3);
        canvas.fill_rect(Rect::new(0, 0, 1, 1), Rgb::WHITE);
        renderer.present(canvas).unwrap();
        assert!(renderer.stats().full_redraw);
        assert_eq!(renderer.size(), (6, 3));
    }
}
