//! Pointer overlay - decorative grid, crosshair, and target brackets.
//!
//! Drawn over the composed frame after all content, and purely decorative:
//! nothing here registers hit regions or consumes events. Overlay glyphs
//! only land on blank cells; where the crosshair passes through text the
//! cell keeps its character and gets a faint background tint instead, which
//! reads like the translucent line it stands in for.

use crate::render::FrameBuffer;
use crate::theme::Theme;
use crate::types::Rgba;

/// Grid pitch in cells. Terminal cells are roughly twice as tall as wide,
/// so the row pitch is half the column pitch to keep the grid square-ish.
pub const GRID_COL_PITCH: u16 = 10;
pub const GRID_ROW_PITCH: u16 = 5;

/// Target bracket geometry around the pointer, in cells.
const BRACKET_ARM: u16 = 4;
const BRACKET_GAP: u16 = 2;

/// Blend factor for tinting occupied cells the crosshair crosses.
const TINT_ALPHA: f32 = 0.25;

// =============================================================================
// Drawing
// =============================================================================

/// Draw the full overlay for the current pointer position. `pointer` is None
/// until the first pointer event, in which case only the grid is drawn.
pub fn draw_overlay(buffer: &mut FrameBuffer, theme: &Theme, pointer: Option<(u16, u16)>) {
    draw_grid(buffer, theme.grid);

    if let Some((x, y)) = pointer {
        draw_crosshair(buffer, theme, x, y);
        draw_coords(buffer, theme.crosshair, x, y);
        draw_brackets(buffer, theme.crosshair, x, y);
    }
}

fn draw_grid(buffer: &mut FrameBuffer, color: Rgba) {
    let (width, height) = (buffer.width(), buffer.height());
    for y in (0..height).step_by(GRID_ROW_PITCH as usize) {
        for x in (0..width).step_by(GRID_COL_PITCH as usize) {
            overlay_char(buffer, x, y, '+', color);
        }
    }
}

fn draw_crosshair(buffer: &mut FrameBuffer, theme: &Theme, x: u16, y: u16) {
    for col in 0..buffer.width() {
        if col != x {
            overlay_line_char(buffer, col, y, '─', theme);
        }
    }
    for row in 0..buffer.height() {
        if row != y {
            overlay_line_char(buffer, x, row, '│', theme);
        }
    }
    overlay_line_char(buffer, x, y, '┼', theme);
}

fn draw_coords(buffer: &mut FrameBuffer, color: Rgba, x: u16, y: u16) {
    let label = format!("X:{x} Y:{y}");
    // Above and to the right of the pointer, flipped when near the edges.
    let text_x = if x + 2 + label.len() as u16 <= buffer.width() {
        x + 2
    } else {
        x.saturating_sub(label.len() as u16 + 2)
    };
    let text_y = if y > 0 { y - 1 } else { y + 1 };
    for (i, ch) in label.chars().enumerate() {
        overlay_char(buffer, text_x + i as u16, text_y, ch, color);
    }
}

fn draw_brackets(buffer: &mut FrameBuffer, color: Rgba, x: u16, y: u16) {
    // Bracket arms are half as long vertically as horizontally, matching the
    // cell aspect ratio.
    let (ax, ay) = (BRACKET_ARM, BRACKET_ARM / 2);
    let (gx, gy) = (BRACKET_GAP, BRACKET_GAP / 2);

    let corners = [
        (x.checked_sub(ax), y.checked_sub(ay), '┌', 1i32, 1i32),
        (x.checked_add(ax), y.checked_sub(ay), '┐', -1, 1),
        (x.checked_add(ax), y.checked_add(ay), '┘', -1, -1),
        (x.checked_sub(ax), y.checked_add(ay), '└', 1, -1),
    ];

    for (cx, cy, corner, dx, dy) in corners {
        let (Some(cx), Some(cy)) = (cx, cy) else {
            continue;
        };
        overlay_char(buffer, cx, cy, corner, color);
        // Horizontal arm toward the gap.
        for step in 1..=(ax - gx) as i32 {
            let col = cx as i32 + dx * step;
            if col >= 0 {
                overlay_char(buffer, col as u16, cy, '─', color);
            }
        }
        // Vertical arm toward the gap.
        for step in 1..=(ay.saturating_sub(gy)) as i32 {
            let row = cy as i32 + dy * step;
            if row >= 0 {
                overlay_char(buffer, cx, row as u16, '│', color);
            }
        }
    }
}

/// Place an overlay glyph on a blank cell; occupied cells are left alone.
fn overlay_char(buffer: &mut FrameBuffer, x: u16, y: u16, ch: char, color: Rgba) {
    if let Some(cell) = buffer.get(x, y) {
        if cell.char == ' ' as u32 {
            let bg = cell.bg;
            buffer.set(
                x,
                y,
                crate::types::Cell {
                    char: ch as u32,
                    fg: color,
                    bg,
                    attrs: crate::types::Attr::NONE,
                },
            );
        }
    }
}

/// Crosshair variant: blank cells get the line glyph, occupied cells keep
/// their character over a tinted background.
fn overlay_line_char(buffer: &mut FrameBuffer, x: u16, y: u16, ch: char, theme: &Theme) {
    if let Some(cell) = buffer.get(x, y) {
        if cell.char == ' ' as u32 {
            overlay_char(buffer, x, y, ch, theme.crosshair);
        } else {
            let mut tinted = *cell;
            tinted.bg = theme.crosshair.over(cell.bg, TINT_ALPHA);
            buffer.set(x, y, tinted);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::presets;

    fn frame() -> FrameBuffer {
        let theme = presets::dark();
        let mut buffer = FrameBuffer::new(40, 20);
        buffer.clear(theme.background);
        buffer
    }

    fn char_at(buffer: &FrameBuffer, x: u16, y: u16) -> char {
        char::from_u32(buffer.get(x, y).map(|c| c.char).unwrap_or(0)).unwrap_or('\0')
    }

    #[test]
    fn test_grid_dots_at_pitch() {
        let theme = presets::dark();
        let mut buffer = frame();
        draw_overlay(&mut buffer, &theme, None);
        assert_eq!(char_at(&buffer, 0, 0), '+');
        assert_eq!(char_at(&buffer, 10, 5), '+');
        assert_eq!(char_at(&buffer, 20, 10), '+');
        // Off-pitch cells stay blank.
        assert_eq!(char_at(&buffer, 3, 3), ' ');
    }

    #[test]
    fn test_crosshair_spans_frame() {
        let theme = presets::dark();
        let mut buffer = frame();
        draw_overlay(&mut buffer, &theme, Some((15, 8)));
        assert_eq!(char_at(&buffer, 15, 8), '┼');
        assert_eq!(char_at(&buffer, 0, 8), '─');
        assert_eq!(char_at(&buffer, 39, 8), '─');
        assert_eq!(char_at(&buffer, 15, 0), '│');
        assert_eq!(char_at(&buffer, 15, 19), '│');
    }

    #[test]
    fn test_coords_label_near_pointer() {
        let theme = presets::dark();
        let mut buffer = frame();
        draw_overlay(&mut buffer, &theme, Some((10, 10)));
        let label: String = (0..9).map(|i| char_at(&buffer, 12 + i, 9)).collect();
        assert!(label.starts_with("X:10 Y:10".get(..label.len()).unwrap_or("")));
        assert_eq!(char_at(&buffer, 12, 9), 'X');
    }

    #[test]
    fn test_overlay_does_not_clobber_text() {
        let theme = presets::dark();
        let mut buffer = frame();
        buffer.draw_text(0, 8, "HELLO", theme.text, None, crate::types::Attr::NONE);
        draw_overlay(&mut buffer, &theme, Some((15, 8)));
        // Text on the crosshair row survives, with a tinted background.
        assert_eq!(char_at(&buffer, 0, 8), 'H');
        let cell = buffer.get(0, 8).copied().unwrap();
        assert_ne!(cell.bg, theme.background);
    }

    #[test]
    fn test_pointer_at_origin_stays_in_bounds() {
        let theme = presets::dark();
        let mut buffer = frame();
        // Must not panic or wrap at the corner.
        draw_overlay(&mut buffer, &theme, Some((0, 0)));
        assert_eq!(char_at(&buffer, 0, 0), '┼');
    }
}
