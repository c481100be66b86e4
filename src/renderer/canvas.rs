//! A grid of styled cells the page is painted into.
//!
//! Text is laid out by grapheme cluster. Wide clusters take two columns; the
//! second is stored as a continuation cell with an empty symbol.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::color::Rgb;
use crate::geometry::Rect;

/// Cell styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl CellStyle {
    #[must_use]
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(0xc0, 0xc0, 0xc0), Rgb::BLACK)
    }
}

/// One terminal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    symbol: String,
    pub style: CellStyle,
}

impl Cell {
    #[must_use]
    pub fn blank(bg: Rgb) -> Self {
        Self {
            symbol: " ".to_string(),
            style: CellStyle::new(bg, bg),
        }
    }

    fn continuation(style: CellStyle) -> Self {
        Self {
            symbol: String::new(),
            style,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Right half of a wide cluster.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.symbol.is_empty()
    }
}

/// Display width of `text` in columns.
#[must_use]
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// A width x height grid of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank(Rgb::BLACK); len],
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole canvas as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x as i32, y as i32).map(|i| &self.cells[i])
    }

    /// Fill every cell with `bg`.
    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Fill the part of `rect` that is on the canvas.
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgb) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in area.top..area.bottom() {
            for x in area.left..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = Cell::blank(bg);
                }
            }
        }
    }

    /// Draw `text` on one row starting at `x`, clipped to `clip`.
    ///
    /// Returns the number of columns advanced, including clipped ones. A wide
    /// cluster that would straddle the clip edge is dropped.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, style: CellStyle, clip: Rect) -> i32 {
        let Some(clip) = clip.intersect(&self.bounds()) else {
            return text_width(text) as i32;
        };
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let width = text_width(grapheme) as i32;
            if width == 0 {
                continue;
            }
            let fits = y >= clip.top
                && y < clip.bottom()
                && col >= clip.left
                && col + width <= clip.right();
            if fits {
                if let Some(i) = self.index(col, y) {
                    self.cells[i] = Cell {
                        symbol: grapheme.to_string(),
                        style,
                    };
                }
                for extra in 1..width {
                    if let Some(i) = self.index(col + extra, y) {
                        self.cells[i] = Cell::continuation(style);
                    }
                }
            }
            col += width;
        }
        col - x
    }

    /// Draw a single-line border around `rect`.
    pub fn draw_border(&mut self, rect: Rect, style: CellStyle) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let clip = self.bounds();
        let (l, t, r, b) = (rect.left, rect.top, rect.right() - 1, rect.bottom() - 1);
        for x in l + 1..r {
            self.draw_text(x, t, "─", style, clip);
            self.draw_text(x, b, "─", style, clip);
        }
        for y in t + 1..b {
            self.draw_text(l, y, "│", style, clip);
            self.draw_text(r, y, "│", style, clip);
        }
        self.draw_text(l, t, "┌", style, clip);
        self.draw_text(r, t, "┐", style, clip);
        self.draw_text(l, b, "└", style, clip);
        self.draw_text(r, b, "┘", style, clip);
    }

    /// Row `y` as plain text, continuation cells skipped.
    #[must_use]
    pub fn row_text(&self, y: u32) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(Cell::symbol)
            .collect()
    }

    /// Cells that differ from `previous`, row by row. A size change marks
    /// every cell.
    #[must_use]
    pub fn diff(&self, previous: &Self) -> Vec<(u32, u32)> {
        let full = previous.size() != self.size();
        let mut changed = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let i = (y * self.width + x) as usize;
                if full || previous.cells[i] != self.cells[i] {
                    changed.push((x, y));
                }
            }
        }
        changed
    }
}
