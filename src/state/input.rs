//! Input - crossterm event conversion and polling.
//!
//! Bridges crossterm's event stream to the crate's own event types. The page
//! consumes three kinds of signal: keys (navigation, gate actions, challenge
//! typing), pointer events (overlay + wheel scroll), and resizes.

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;

// =============================================================================
// Event types
// =============================================================================

/// Unified event type for the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press or repeat.
    Key(KeyPress),
    /// Pointer move, click, or wheel.
    Pointer(PointerEvent),
    /// Terminal resize (new width, height).
    Resize(u16, u16),
    /// Unhandled event type (focus changes, pastes, key releases).
    None,
}

/// A pressed key with its relevant modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Other,
}

/// Pointer activity in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Down,
    ScrollUp,
    ScrollDown,
}

// =============================================================================
// Conversion
// =============================================================================

/// Convert a crossterm key event. Release events produce `InputEvent::None`.
pub fn convert_key_event(event: CrosstermKeyEvent) -> InputEvent {
    if event.kind == KeyEventKind::Release {
        return InputEvent::None;
    }

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => Key::Other,
    };

    InputEvent::Key(KeyPress {
        key,
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
    })
}

/// Convert a crossterm mouse event. Drags, ups, and horizontal scroll are
/// not interesting to the page and produce `InputEvent::None`.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> InputEvent {
    let kind = match event.kind {
        MouseEventKind::Moved => PointerKind::Move,
        MouseEventKind::Down(_) => PointerKind::Down,
        MouseEventKind::ScrollUp => PointerKind::ScrollUp,
        MouseEventKind::ScrollDown => PointerKind::ScrollDown,
        _ => return InputEvent::None,
    };

    InputEvent::Pointer(PointerEvent {
        kind,
        x: event.column,
        y: event.row,
    })
}

// =============================================================================
// Polling
// =============================================================================

/// Poll for an event with a timeout. Returns None if nothing arrived.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(convert_key_event(key)),
        CrosstermEvent::Mouse(mouse) => Ok(convert_mouse_event(mouse)),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// Mouse capture
// =============================================================================

/// Enable mouse capture (moves, clicks, wheel).
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable mouse capture.
pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_char_key() {
        let event = convert_key_event(key_event(
            KeyCode::Char('t'),
            KeyModifiers::empty(),
            KeyEventKind::Press,
        ));
        assert_eq!(
            event,
            InputEvent::Key(KeyPress {
                key: Key::Char('t'),
                ctrl: false
            })
        );
    }

    #[test]
    fn test_convert_ctrl_c() {
        let event = convert_key_event(key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert_eq!(
            event,
            InputEvent::Key(KeyPress {
                key: Key::Char('c'),
                ctrl: true
            })
        );
    }

    #[test]
    fn test_release_ignored() {
        let event = convert_key_event(key_event(
            KeyCode::Char('x'),
            KeyModifiers::empty(),
            KeyEventKind::Release,
        ));
        assert_eq!(event, InputEvent::None);
    }

    #[test]
    fn test_convert_navigation_keys() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Esc, Key::Esc),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::PageUp, Key::PageUp),
            (KeyCode::PageDown, Key::PageDown),
            (KeyCode::Home, Key::Home),
            (KeyCode::End, Key::End),
        ];

        for (code, expected) in cases {
            let event =
                convert_key_event(key_event(code, KeyModifiers::empty(), KeyEventKind::Press));
            assert_eq!(
                event,
                InputEvent::Key(KeyPress {
                    key: expected,
                    ctrl: false
                })
            );
        }
    }

    #[test]
    fn test_convert_mouse_move() {
        let event = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::Moved,
            column: 30,
            row: 12,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(
            event,
            InputEvent::Pointer(PointerEvent {
                kind: PointerKind::Move,
                x: 30,
                y: 12
            })
        );
    }

    #[test]
    fn test_convert_mouse_scroll() {
        let event = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(
            event,
            InputEvent::Pointer(PointerEvent {
                kind: PointerKind::ScrollDown,
                x: 0,
                y: 0
            })
        );
    }

    #[test]
    fn test_convert_mouse_drag_ignored() {
        let event = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 5,
            row: 5,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(event, InputEvent::None);
    }
}
