//! ANSI escape sequences.
//!
//! Everything the renderer says to the terminal lives here: cursor movement,
//! colors, alternate screen, synchronized output, and the OSC 52 clipboard
//! escape. All functions write into an [`OutputBuffer`]; nothing here touches
//! stdout directly.

use std::io::{self, Write};

use crate::types::Rgba;

use super::output::OutputBuffer;

const ESC: &[u8] = b"\x1b";

// =============================================================================
// Screen control
// =============================================================================

/// Enter the alternate screen buffer.
pub fn enter_alt_screen(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer.
pub fn exit_alt_screen(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[?1049l")
}

/// Clear the whole screen.
pub fn clear_screen(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[2J")
}

/// Hide the terminal cursor.
pub fn cursor_hide(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[?25l")
}

/// Show the terminal cursor.
pub fn cursor_show(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[?25h")
}

/// Move the cursor to (x, y), zero-based.
pub fn cursor_to(out: &mut OutputBuffer, x: u16, y: u16) -> io::Result<()> {
    write!(out, "\x1b[{};{}H", y + 1, x + 1)
}

/// Reset all attributes and colors.
pub fn reset(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[0m")
}

// =============================================================================
// Synchronized output (DEC 2026)
// =============================================================================

/// Begin a synchronized update block.
pub fn begin_sync(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[?2026h")
}

/// End a synchronized update block.
pub fn end_sync(out: &mut OutputBuffer) -> io::Result<()> {
    out.write_all(b"\x1b[?2026l")
}

// =============================================================================
// Colors
// =============================================================================

/// Emit a foreground color. Terminal default maps to SGR 39.
pub fn set_fg(out: &mut OutputBuffer, color: Rgba) -> io::Result<()> {
    if color.is_terminal_default() {
        out.write_all(b"\x1b[39m")
    } else {
        write!(out, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Emit a background color. Terminal default maps to SGR 49.
pub fn set_bg(out: &mut OutputBuffer, color: Rgba) -> io::Result<()> {
    if color.is_terminal_default() {
        out.write_all(b"\x1b[49m")
    } else {
        write!(out, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }
}

// =============================================================================
// OSC 52 clipboard
// =============================================================================

/// Write text to the system clipboard via OSC 52.
///
/// Support depends on the terminal emulator; callers must treat this as
/// best-effort and keep their own fallback buffer.
pub fn osc52_copy(out: &mut OutputBuffer, text: &str) -> io::Result<()> {
    out.write_all(ESC)?;
    out.write_all(b"]52;c;")?;
    out.write_all(base64(text.as_bytes()).as_bytes())?;
    out.write_all(ESC)?;
    out.write_all(b"\\")
}

/// Standard base64 with padding, as OSC 52 requires.
fn base64(input: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(TABLE[(triple >> 18 & 0x3f) as usize] as char);
        out.push(TABLE[(triple >> 12 & 0x3f) as usize] as char);
        out.push(if chunk.len() > 1 {
            TABLE[(triple >> 6 & 0x3f) as usize] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            TABLE[(triple & 0x3f) as usize] as char
        } else {
            '='
        });
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_to_is_one_based() {
        let mut out = OutputBuffer::new();
        cursor_to(&mut out, 0, 0).unwrap();
        assert_eq!(out.as_bytes(), b"\x1b[1;1H");

        let mut out = OutputBuffer::new();
        cursor_to(&mut out, 9, 4).unwrap();
        assert_eq!(out.as_bytes(), b"\x1b[5;10H");
    }

    #[test]
    fn test_set_fg_rgb_and_default() {
        let mut out = OutputBuffer::new();
        set_fg(&mut out, Rgba::rgb(1, 2, 3)).unwrap();
        assert_eq!(out.as_bytes(), b"\x1b[38;2;1;2;3m");

        let mut out = OutputBuffer::new();
        set_fg(&mut out, Rgba::TERMINAL_DEFAULT).unwrap();
        assert_eq!(out.as_bytes(), b"\x1b[39m");
    }

    #[test]
    fn test_base64_known_vectors() {
        assert_eq!(base64(b""), "");
        assert_eq!(base64(b"f"), "Zg==");
        assert_eq!(base64(b"fo"), "Zm8=");
        assert_eq!(base64(b"foo"), "Zm9v");
        assert_eq!(base64(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_osc52_wraps_payload() {
        let mut out = OutputBuffer::new();
        osc52_copy(&mut out, "hi").unwrap();
        let bytes = out.as_bytes();
        assert!(bytes.starts_with(b"\x1b]52;c;"));
        assert!(bytes.ends_with(b"\x1b\\"));
    }
}
