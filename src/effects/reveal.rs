//! Scroll reveal - maps scroll position to per-line visibility.
//!
//! Not an animation: there is no timer here. Progress is a pure function of
//! the element's position in the viewport, recomputed on every scroll or
//! resize event, and lines reveal top-first as progress grows.

/// Progress reaches 0 when the element top sits at this fraction of the
/// viewport height, and 1 when it reaches [`REVEAL_END_FRACTION`].
pub const REVEAL_START_FRACTION: f32 = 0.8;
pub const REVEAL_END_FRACTION: f32 = 0.2;

/// How hidden lines render: dimmed toward the background and nudged along
/// the reading axis.
pub const HIDDEN_OPACITY: f32 = 0.1;
pub const HIDDEN_OFFSET_CELLS: u16 = 2;

// =============================================================================
// Progress
// =============================================================================

/// Compute reveal progress from the element's top row and the viewport
/// height. Clamped to [0, 1].
pub fn reveal_progress(element_top: f32, viewport_height: f32) -> f32 {
    let start = REVEAL_START_FRACTION * viewport_height;
    let end = REVEAL_END_FRACTION * viewport_height;
    if start <= end {
        return 1.0;
    }
    ((start - element_top) / (start - end)).clamp(0.0, 1.0)
}

/// Whether line `index` of `total` non-blank lines is visible at `progress`.
/// Strict comparison: at progress 0 no line is visible.
pub fn line_visible(index: usize, total: usize, progress: f32) -> bool {
    if total == 0 {
        return true;
    }
    progress > index as f32 / total as f32
}

// =============================================================================
// RevealBlock
// =============================================================================

/// Per-line render state at a given progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    pub visible: bool,
    /// Indent applied while hidden, in cells.
    pub offset: u16,
}

/// A multi-line text block whose lines reveal top-first as the reader
/// scrolls it into view. Blank lines are spacing only and do not count
/// toward the reveal sequence.
pub struct RevealBlock {
    lines: Vec<String>,
    reveal_total: usize,
}

impl RevealBlock {
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let reveal_total = lines.iter().filter(|l| !l.trim().is_empty()).count();
        Self {
            lines,
            reveal_total,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render state for every line at the given progress. Blank lines are
    /// always reported visible.
    pub fn line_states(&self, progress: f32) -> Vec<LineState> {
        let mut ordinal = 0;
        self.lines
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    return LineState {
                        visible: true,
                        offset: 0,
                    };
                }
                let visible = line_visible(ordinal, self.reveal_total, progress);
                ordinal += 1;
                LineState {
                    visible,
                    offset: if visible { 0 } else { HIDDEN_OFFSET_CELLS },
                }
            })
            .collect()
    }

    /// Number of non-blank lines currently visible.
    pub fn visible_count(&self, progress: f32) -> usize {
        (0..self.reveal_total)
            .filter(|&i| line_visible(i, self.reveal_total, progress))
            .count()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_zero_before_start_line() {
        // Element top at 80% of a 100-row viewport: progress exactly 0.
        assert_eq!(reveal_progress(80.0, 100.0), 0.0);
        // Below the start line it stays clamped at 0.
        assert_eq!(reveal_progress(95.0, 100.0), 0.0);
    }

    #[test]
    fn test_progress_one_past_end_line() {
        assert_eq!(reveal_progress(20.0, 100.0), 1.0);
        assert_eq!(reveal_progress(0.0, 100.0), 1.0);
    }

    #[test]
    fn test_progress_midpoint() {
        // Top at 50 of 100: (80 - 50) / (80 - 20) = 0.5.
        let p = reveal_progress(50.0, 100.0);
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_lines_visible_at_zero_progress() {
        let block = RevealBlock::new("one\ntwo\nthree");
        assert_eq!(block.visible_count(0.0), 0);
    }

    #[test]
    fn test_all_lines_visible_at_full_progress() {
        let block = RevealBlock::new("one\ntwo\nthree");
        assert_eq!(block.visible_count(1.0), 3);
    }

    #[test]
    fn test_reveal_is_top_first_and_monotonic() {
        let block = RevealBlock::new("a\nb\nc\nd");
        let mut previous = 0;
        for step in 0..=20 {
            let progress = step as f32 / 20.0;
            let states = block.line_states(progress);
            // Visible lines always form a prefix.
            let count = block.visible_count(progress);
            for (i, state) in states.iter().enumerate() {
                assert_eq!(state.visible, i < count, "progress {progress}");
            }
            assert!(count >= previous, "count regressed at progress {progress}");
            previous = count;
        }
    }

    #[test]
    fn test_blank_lines_do_not_count() {
        let block = RevealBlock::new("a\n\nb");
        // Two non-blank lines: just past 0.5 reveals the second.
        assert_eq!(block.visible_count(0.6), 2);
        let states = block.line_states(0.3);
        assert!(states[0].visible);
        assert!(states[1].visible); // blank, spacing only
        assert!(!states[2].visible);
        assert_eq!(states[2].offset, HIDDEN_OFFSET_CELLS);
    }

    #[test]
    fn test_degenerate_viewport_is_fully_revealed() {
        assert_eq!(reveal_progress(5.0, 0.0), 1.0);
    }
}
