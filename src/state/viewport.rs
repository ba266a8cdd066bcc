//! Viewport state - terminal size and page scroll position.
//!
//! The page is one tall column of sections; the viewport is a window over it
//! driven by a single scroll offset. Size and offset are signals so the frame
//! derived re-runs on resize and scroll.
//!
//! The signals live directly in `thread_local!` statics. Writes must never
//! happen under a held `RefCell` borrow: `Signal::set` flushes subscribed
//! effects synchronously, and those effects read these same accessors.
//!
//! scrollOffset = user state; maxScroll = computed from content height.

use spark_signals::{batch, signal, Signal};

// =============================================================================
// Scroll constants
// =============================================================================

/// Scroll amount for arrow keys (rows).
pub const LINE_SCROLL: u16 = 1;

/// Scroll amount for the mouse wheel.
pub const WHEEL_SCROLL: u16 = 3;

/// Page Up/Down scrolls 90% of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// Signals
// =============================================================================

thread_local! {
    static WIDTH: Signal<u16> = signal(80);
    static HEIGHT: Signal<u16> = signal(24);
    static SCROLL_OFFSET: Signal<u16> = signal(0);
    static CONTENT_HEIGHT: Signal<u16> = signal(0);
}

// =============================================================================
// Terminal size
// =============================================================================

/// Update the terminal size (from a resize event or initial detection).
///
/// Re-clamps the scroll offset so a shrink never leaves the viewport past
/// the end of the page. Batched: subscribed effects flush once, after both
/// dimensions and the offset have settled.
pub fn set_terminal_size(width: u16, height: u16) {
    batch(|| {
        WIDTH.with(|s| s.set(width));
        HEIGHT.with(|s| s.set(height));
        let max = max_scroll();
        SCROLL_OFFSET.with(|s| {
            if s.get() > max {
                s.set(max);
            }
        });
    });
}

/// Terminal width in columns (tracked).
pub fn terminal_width() -> u16 {
    WIDTH.with(|s| s.get())
}

/// Terminal height in rows (tracked).
pub fn terminal_height() -> u16 {
    HEIGHT.with(|s| s.get())
}

// =============================================================================
// Page scroll
// =============================================================================

/// Record the total page height, computed by section layout.
pub fn set_content_height(rows: u16) {
    CONTENT_HEIGHT.with(|s| s.set(rows));
}

/// Current scroll offset in rows (tracked).
pub fn scroll_offset() -> u16 {
    SCROLL_OFFSET.with(|s| s.get())
}

/// Maximum scroll offset given current content and viewport.
pub fn max_scroll() -> u16 {
    let content = CONTENT_HEIGHT.with(|s| s.get());
    content.saturating_sub(HEIGHT.with(|s| s.get()))
}

/// Scroll by a delta (positive = down). Returns true if the offset moved.
pub fn scroll_by(delta: i32) -> bool {
    let max = max_scroll();
    let current = scroll_offset();
    let new = ((current as i32) + delta).clamp(0, max as i32) as u16;
    if new == current {
        return false; // Already at boundary
    }
    SCROLL_OFFSET.with(|s| s.set(new));
    true
}

/// Jump to the top of the page.
pub fn scroll_to_top() {
    SCROLL_OFFSET.with(|s| s.set(0));
}

/// Jump to the bottom of the page.
pub fn scroll_to_bottom() {
    let max = max_scroll();
    SCROLL_OFFSET.with(|s| s.set(max));
}

/// Scroll to put a given page row at the top (clamped).
pub fn scroll_to_row(row: u16) {
    let max = max_scroll();
    SCROLL_OFFSET.with(|s| s.set(row.min(max)));
}

/// Rows scrolled by Page Up/Down for the current viewport.
pub fn page_scroll_amount() -> u16 {
    let height = terminal_height();
    ((height as f32 * PAGE_SCROLL_FACTOR) as u16).max(1)
}

/// Reset viewport state to defaults (for testing).
pub fn reset_viewport_state() {
    batch(|| {
        WIDTH.with(|s| s.set(80));
        HEIGHT.with(|s| s.set(24));
        SCROLL_OFFSET.with(|s| s.set(0));
        CONTENT_HEIGHT.with(|s| s.set(0));
    });
}

// =============================================================================
// Tests
// =============================================================================
