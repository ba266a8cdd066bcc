//! Output buffering and stateful cell emission.
//!
//! Terminal writes are batched into an [`OutputBuffer`] and flushed in a
//! single syscall per frame. The [`StatefulCellRenderer`] tracks the cursor
//! position and active colors so consecutive cells share escape sequences.

use std::io::{self, Write};

use crate::types::{Attr, Cell, Rgba};

use super::ansi;

// =============================================================================
// OutputBuffer
// =============================================================================

/// Growable byte buffer flushed to stdout once per frame.
pub struct OutputBuffer {
    bytes: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// View the pending bytes (for tests).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Flush pending bytes to stdout and clear the buffer.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.bytes)?;
        stdout.flush()?;
        self.bytes.clear();
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Emits cells while tracking terminal state to avoid redundant escapes.
///
/// Cursor position advances implicitly after each printed character, so runs
/// of adjacent changed cells cost one cursor move. Colors and attributes are
/// only re-emitted when they differ from the previous cell.
pub struct StatefulCellRenderer {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Forget all tracked state. Call at the start of each frame.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.fg = None;
        self.bg = None;
        self.attrs = None;
    }

    /// Render one cell at (x, y).
    pub fn render_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        // Cursor move only when not already in position
        if self.cursor != Some((x, y)) {
            let _ = ansi::cursor_to(out, x, y);
        }

        if self.attrs != Some(cell.attrs) {
            let _ = ansi::reset(out);
            let _ = Self::emit_attrs(out, cell.attrs);
            // reset clears colors too
            self.fg = None;
            self.bg = None;
            self.attrs = Some(cell.attrs);
        }

        if self.fg != Some(cell.fg) {
            let _ = ansi::set_fg(out, cell.fg);
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            let _ = ansi::set_bg(out, cell.bg);
            self.bg = Some(cell.bg);
        }

        let ch = char::from_u32(cell.char).unwrap_or(' ');
        let mut buf = [0u8; 4];
        let _ = out.write_all(ch.encode_utf8(&mut buf).as_bytes());

        // Printing advances the cursor one column
        self.cursor = Some((x + 1, y));
    }

    fn emit_attrs(out: &mut OutputBuffer, attrs: Attr) -> io::Result<()> {
        if attrs.contains(Attr::BOLD) {
            out.write_all(b"\x1b[1m")?;
        }
        if attrs.contains(Attr::DIM) {
            out.write_all(b"\x1b[2m")?;
        }
        if attrs.contains(Attr::ITALIC) {
            out.write_all(b"\x1b[3m")?;
        }
        if attrs.contains(Attr::UNDERLINE) {
            out.write_all(b"\x1b[4m")?;
        }
        if attrs.contains(Attr::INVERSE) {
            out.write_all(b"\x1b[7m")?;
        }
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(ch: char) -> Cell {
        Cell {
            char: ch as u32,
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
            attrs: Attr::NONE,
        }
    }

    #[test]
    fn test_adjacent_cells_share_cursor_move() {
        let mut out = OutputBuffer::new();
        let mut renderer = StatefulCellRenderer::new();

        renderer.render_cell(&mut out, 0, 0, &cell('a'));
        let after_first = out.as_bytes().len();
        renderer.render_cell(&mut out, 1, 0, &cell('b'));
        let second_len = out.as_bytes().len() - after_first;

        // Second cell needs no cursor move and no color changes: one byte.
        assert_eq!(second_len, 1);
    }

    #[test]
    fn test_color_change_reemits_sgr() {
        let mut out = OutputBuffer::new();
        let mut renderer = StatefulCellRenderer::new();

        renderer.render_cell(&mut out, 0, 0, &cell('a'));
        let mut red = cell('b');
        red.fg = Rgba::RED;
        let before = out.as_bytes().len();
        renderer.render_cell(&mut out, 1, 0, &red);

        let emitted = &out.as_bytes()[before..];
        assert!(emitted.starts_with(b"\x1b[38;2;255;0;0m"));
    }

    #[test]
    fn test_reset_forgets_state() {
        let mut out = OutputBuffer::new();
        let mut renderer = StatefulCellRenderer::new();

        renderer.render_cell(&mut out, 0, 0, &cell('a'));
        renderer.reset();

        let before = out.as_bytes().len();
        renderer.render_cell(&mut out, 1, 0, &cell('b'));
        let emitted = &out.as_bytes()[before..];
        // After reset the cursor move must be re-emitted.
        assert!(emitted.starts_with(b"\x1b[1;2H"));
    }
}
