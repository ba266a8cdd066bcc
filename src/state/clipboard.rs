//! Clipboard state - internal buffer with best-effort system write.
//!
//! The internal buffer always succeeds and is the source of truth for tests.
//! The system clipboard is reached separately through an OSC 52 escape
//! (`render::ansi::osc52_copy`), which terminals are free to ignore - a
//! denied system write degrades to buffer-only, and the caller simply skips
//! its "copied" confirmation.

use std::cell::RefCell;

thread_local! {
    /// Internal clipboard buffer.
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Copy text to the internal buffer.
///
/// Empty strings are ignored (buffer not modified). Returns true when the
/// buffer was updated.
pub fn copy(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
    true
}

/// Read the most recently copied text.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

/// Check if the buffer has content.
pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().is_some())
}

/// Clear the buffer.
pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        clear();
    }

    #[test]
    fn test_copy_paste() {
        setup();

        assert!(paste().is_none());
        assert!(!has_content());

        assert!(copy("hello"));
        assert_eq!(paste(), Some("hello".to_string()));
        assert!(has_content());

        // Paste is non-destructive.
        assert_eq!(paste(), Some("hello".to_string()));
    }

    #[test]
    fn test_copy_overwrites() {
        setup();
        copy("first");
        copy("second");
        assert_eq!(paste(), Some("second".to_string()));
    }

    #[test]
    fn test_copy_empty_ignored() {
        setup();
        copy("something");
        assert!(!copy(""));
        assert_eq!(paste(), Some("something".to_string()));
    }

    #[test]
    fn test_clear() {
        setup();
        copy("something");
        clear();
        assert!(!has_content());
        assert!(paste().is_none());
    }
}
