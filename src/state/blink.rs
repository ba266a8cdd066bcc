//! Blink clocks - shared phase toggles per period.
//!
//! All carets blinking at the same period share one clock for efficiency and
//! visual sync. The clock starts with the first subscriber and stops when the
//! last unsubscribes; the phase is a signal, so deriveds that read it are
//! re-run on every toggle.
//!
//! # Example
//!
//! ```ignore
//! use termfolio::state::blink::{subscribe_to_blink, blink_phase, CARET_BLINK_MS};
//!
//! let unsubscribe = subscribe_to_blink(CARET_BLINK_MS);
//! let visible = blink_phase(CARET_BLINK_MS);
//! unsubscribe(); // Stop blinking
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use spark_signals::{signal, Signal};

use super::timers::{self, TimerHandle};

/// Standard caret blink period: phase toggles every 500 ms.
pub const CARET_BLINK_MS: u64 = 500;

// =============================================================================
// Blink registry
// =============================================================================

/// Per-period blink clock.
struct BlinkClock {
    /// Phase signal: true = visible.
    phase: Signal<bool>,
    /// The repeating toggle task. Dropping it stops the clock.
    handle: Option<TimerHandle>,
    /// Number of active subscribers.
    subscribers: usize,
}

thread_local! {
    /// Map from period (ms) to blink clock.
    static BLINK_CLOCKS: RefCell<HashMap<u64, BlinkClock>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Public API
// =============================================================================

/// Subscribe to the blink clock with the given toggle period.
///
/// Returns an unsubscribe function that must be called (or dropped through a
/// component's teardown) when done. Multiple subscribers at the same period
/// share one clock.
///
/// A period of 0 returns a no-op unsubscribe (blink disabled).
pub fn subscribe_to_blink(period_ms: u64) -> Box<dyn FnOnce()> {
    if period_ms == 0 {
        return Box::new(|| {});
    }

    BLINK_CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();

        let clock = clocks.entry(period_ms).or_insert_with(|| BlinkClock {
            phase: signal(true), // Start visible
            handle: None,
            subscribers: 0,
        });

        clock.subscribers += 1;

        // Start the toggle task with the first subscriber.
        if clock.subscribers == 1 {
            let phase = clock.phase.clone();
            clock.handle = Some(timers::schedule_interval(
                Duration::from_millis(period_ms),
                move || {
                    phase.set(!phase.get());
                },
            ));
        }
    });

    Box::new(move || {
        // The reset write happens after the registry borrow is released:
        // setting a signal flushes subscribed effects synchronously, and
        // those may re-enter the registry through `blink_phase`.
        let stopped_phase = BLINK_CLOCKS.with(|clocks| {
            let mut clocks = clocks.borrow_mut();
            let clock = clocks.get_mut(&period_ms)?;
            clock.subscribers = clock.subscribers.saturating_sub(1);

            // Stop the clock with the last subscriber.
            if clock.subscribers == 0 {
                clock.handle = None;
                return Some(clock.phase.clone());
            }
            None
        });

        if let Some(phase) = stopped_phase {
            phase.set(true); // Reset to visible
        }
    })
}

/// Current blink phase for the given period. True (visible) if no clock runs.
///
/// Reads the phase signal, so calling this inside a derived or effect tracks
/// future toggles.
pub fn blink_phase(period_ms: u64) -> bool {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&period_ms)
            .map(|clock| clock.phase.get())
            .unwrap_or(true)
    })
}

/// Whether a clock is running for the given period.
pub fn is_blink_running(period_ms: u64) -> bool {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&period_ms)
            .map(|clock| clock.subscribers > 0)
            .unwrap_or(false)
    })
}

/// Subscriber count for a period (for tests).
pub fn subscriber_count(period_ms: u64) -> usize {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&period_ms)
            .map(|clock| clock.subscribers)
            .unwrap_or(0)
    })
}

/// Stop all clocks and clear the registry (for tests).
pub fn reset_blink_state() {
    BLINK_CLOCKS.with(|clocks| {
        clocks.borrow_mut().clear();
    });
}

// =============================================================================
// Tests
// =============================================================================
