//! Pointer state - last known mouse position.
//!
//! Fed by mouse-move events, read by the pointer overlay. Position is a pair
//! of signals so the frame derived re-runs on movement; nothing else in the
//! page depends on the pointer. Signals live directly in `thread_local!`
//! statics so a write never flushes effects under a held borrow.

use spark_signals::{batch, signal, Signal};

thread_local! {
    static POINTER_X: Signal<u16> = signal(0);
    static POINTER_Y: Signal<u16> = signal(0);
    /// False until the first move event - the overlay draws no crosshair
    /// for a pointer that has never been seen.
    static POINTER_ACTIVE: Signal<bool> = signal(false);
}

/// Record a pointer move. Batched: one effect flush per move.
pub fn set_pointer(x: u16, y: u16) {
    batch(|| {
        POINTER_X.with(|s| s.set(x));
        POINTER_Y.with(|s| s.set(y));
        POINTER_ACTIVE.with(|s| {
            if !s.get() {
                s.set(true);
            }
        });
    });
}

/// Pointer column (tracked).
pub fn pointer_x() -> u16 {
    POINTER_X.with(|s| s.get())
}

/// Pointer row (tracked).
pub fn pointer_y() -> u16 {
    POINTER_Y.with(|s| s.get())
}

/// Whether the pointer has moved at least once (tracked).
pub fn pointer_active() -> bool {
    POINTER_ACTIVE.with(|s| s.get())
}

/// Reset pointer state to defaults (for testing).
pub fn reset_pointer_state() {
    batch(|| {
        POINTER_X.with(|s| s.set(0));
        POINTER_Y.with(|s| s.set(0));
        POINTER_ACTIVE.with(|s| s.set(false));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_pointer_state();
    }

    #[test]
    fn test_inactive_until_first_move() {
        setup();
        assert!(!pointer_active());
        set_pointer(5, 7);
        assert!(pointer_active());
        assert_eq!(pointer_x(), 5);
        assert_eq!(pointer_y(), 7);
    }

    #[test]
    fn test_tracks_latest_position() {
        setup();
        set_pointer(1, 1);
        set_pointer(30, 12);
        assert_eq!((pointer_x(), pointer_y()), (30, 12));
    }

    #[test]
    fn test_move_under_subscribed_effect() {
        setup();

        let seen = Rc::new(Cell::new((0u16, 0u16)));
        let seen_in_effect = seen.clone();
        let stop = effect(move || {
            seen_in_effect.set((pointer_x(), pointer_y()));
        });

        set_pointer(42, 9);
        assert_eq!(seen.get(), (42, 9));

        stop();
    }
}
