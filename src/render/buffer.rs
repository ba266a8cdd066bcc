//! Frame buffer - the page's cell grid plus drawing operations.
//!
//! All composition goes through here: sections, the pointer overlay, and the
//! modals all draw into the same `FrameBuffer`, back to front. Drawing is
//! clipped to the buffer bounds (and optionally to a `ClipRect`), so callers
//! can draw partially off-screen content without guards.

use crate::types::{Attr, Cell, ClipRect, Rgba};

// =============================================================================
// Border styles
// =============================================================================

/// Box-drawing styles used by cards, the contact terminal, and modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Dashed,
}

impl BorderStyle {
    /// Returns (horizontal, vertical, top_left, top_right, bottom_right, bottom_left).
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Dashed => ('┄', '┆', '┌', '┐', '┘', '└'),
        }
    }
}

// =============================================================================
// FrameBuffer
// =============================================================================

/// A width x height grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the cell at (x, y), if in bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Set the cell at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }

    /// Fill the whole buffer with a background color.
    pub fn clear(&mut self, bg: Rgba) {
        let blank = Cell {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg,
            attrs: Attr::NONE,
        };
        self.cells.fill(blank);
    }

    /// The full buffer as a clip rect.
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    // =========================================================================
    // Drawing operations
    // =========================================================================

    /// Put a single character, keeping the existing cell background.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, fg: Rgba, attrs: Attr) {
        if let Some(existing) = self.get(x, y) {
            let bg = existing.bg;
            self.set(
                x,
                y,
                Cell {
                    char: ch as u32,
                    fg,
                    bg,
                    attrs,
                },
            );
        }
    }

    /// Draw a string starting at (x, y), clipped to the buffer.
    ///
    /// A `bg` of `None` keeps each cell's existing background.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, bg: Option<Rgba>, attrs: Attr) {
        self.draw_text_clipped(x, y, text, fg, bg, attrs, self.bounds());
    }

    /// Draw a string clipped to `clip` (intersected with the buffer bounds).
    pub fn draw_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: ClipRect,
    ) {
        let Some(clip) = clip.intersect(&self.bounds()) else {
            return;
        };
        if y < clip.y || y >= clip.y + clip.height {
            return;
        }

        let mut cx = x;
        for ch in text.chars() {
            if cx >= clip.x + clip.width {
                break;
            }
            if cx >= clip.x {
                let cell_bg = bg.unwrap_or_else(|| self.get(cx, y).map(|c| c.bg).unwrap_or_default());
                self.set(
                    cx,
                    y,
                    Cell {
                        char: ch as u32,
                        fg,
                        bg: cell_bg,
                        attrs,
                    },
                );
            }
            cx = cx.saturating_add(1);
        }
    }

    /// Horizontal line of `ch` across the full row width.
    pub fn hline(&mut self, y: u16, ch: char, fg: Rgba) {
        for x in 0..self.width {
            self.put_char(x, y, ch, fg, Attr::NONE);
        }
    }

    /// Vertical line of `ch` down the full column height.
    pub fn vline(&mut self, x: u16, ch: char, fg: Rgba) {
        for y in 0..self.height {
            self.put_char(x, y, ch, fg, Attr::NONE);
        }
    }

    /// Fill a rectangle with a background color (clipped).
    pub fn fill_rect(&mut self, rect: ClipRect, bg: Rgba) {
        let Some(rect) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set(
                    x,
                    y,
                    Cell {
                        char: b' ' as u32,
                        fg: Rgba::TERMINAL_DEFAULT,
                        bg,
                        attrs: Attr::NONE,
                    },
                );
            }
        }
    }

    /// Draw a border around `rect` (the border occupies the rect's edge cells).
    pub fn draw_border(&mut self, rect: ClipRect, style: BorderStyle, fg: Rgba) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (h, v, tl, tr, br, bl) = style.chars();
        let x1 = rect.x;
        let y1 = rect.y;
        let x2 = rect.x + rect.width - 1;
        let y2 = rect.y + rect.height - 1;

        for x in x1 + 1..x2 {
            self.put_char(x, y1, h, fg, Attr::NONE);
            self.put_char(x, y2, h, fg, Attr::NONE);
        }
        for y in y1 + 1..y2 {
            self.put_char(x1, y, v, fg, Attr::NONE);
            self.put_char(x2, y, v, fg, Attr::NONE);
        }
        self.put_char(x1, y1, tl, fg, Attr::NONE);
        self.put_char(x2, y1, tr, fg, Attr::NONE);
        self.put_char(x2, y2, br, fg, Attr::NONE);
        self.put_char(x1, y2, bl, fg, Attr::NONE);
    }
}

// =============================================================================
// Tests
// =============================================================================
