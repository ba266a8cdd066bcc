//! Timer registry - scheduled tasks with cancellation handles.
//!
//! Timers are the only form of suspension in the app. Every animation tick,
//! staged reveal, indicator expiry, and challenge deadline is a task in this
//! registry, and every task is owned by a [`TimerHandle`]: dropping the
//! handle cancels the task, so a torn-down component can never be ticked
//! again. The main loop drives the registry:
//!
//! ```ignore
//! let timeout = timers::next_deadline(Instant::now());
//! // poll input for at most `timeout` ...
//! timers::run_due(Instant::now());
//! ```
//!
//! Callbacks run on the main thread, outside the registry borrow, so a
//! callback may freely schedule or cancel other timers (including itself).

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

// =============================================================================
// Registry
// =============================================================================

type Callback = Box<dyn FnMut()>;

struct TimerTask {
    deadline: Instant,
    /// Some for repeating tasks, None for one-shots.
    interval: Option<Duration>,
    /// Taken while the callback is running.
    callback: Option<Callback>,
}

struct TimerState {
    next_id: usize,
    tasks: HashMap<usize, TimerTask>,
}

thread_local! {
    static TIMERS: RefCell<TimerState> = RefCell::new(TimerState {
        next_id: 0,
        tasks: HashMap::new(),
    });
}

// =============================================================================
// TimerHandle
// =============================================================================

/// Owning handle for a scheduled task.
///
/// The task runs only while its handle is alive. Dropping the handle cancels
/// the task; this is what makes "timer fires against disposed state"
/// structurally impossible rather than a runtime condition to catch.
#[derive(Debug)]
pub struct TimerHandle {
    id: usize,
}

impl TimerHandle {
    /// Cancel the task now (equivalent to dropping the handle).
    pub fn cancel(self) {
        // Drop impl does the work.
    }

    /// Whether the task is still scheduled (false once a one-shot has fired).
    pub fn is_scheduled(&self) -> bool {
        TIMERS.with(|t| t.borrow().tasks.contains_key(&self.id))
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        // try_with: the registry thread-local may already be destroyed when a
        // handle is dropped during thread teardown; the task is gone then.
        let _ = TIMERS.try_with(|t| {
            t.borrow_mut().tasks.remove(&self.id);
        });
    }
}

// =============================================================================
// Scheduling
// =============================================================================

fn insert(deadline: Instant, interval: Option<Duration>, callback: Callback) -> TimerHandle {
    TIMERS.with(|t| {
        let mut state = t.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.tasks.insert(
            id,
            TimerTask {
                deadline,
                interval,
                callback: Some(callback),
            },
        );
        TimerHandle { id }
    })
}

/// Schedule a one-shot task `delay` from now.
pub fn schedule_once(delay: Duration, f: impl FnOnce() + 'static) -> TimerHandle {
    let mut f = Some(f);
    insert(
        Instant::now() + delay,
        None,
        Box::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        }),
    )
}

/// Schedule a repeating task, first firing `interval` from now.
pub fn schedule_interval(interval: Duration, f: impl FnMut() + 'static) -> TimerHandle {
    insert(Instant::now() + interval, Some(interval), Box::new(f))
}

// =============================================================================
// Driving
// =============================================================================

/// Time until the nearest deadline, or None when nothing is scheduled.
///
/// Returns `Duration::ZERO` when a task is already due.
pub fn next_deadline(now: Instant) -> Option<Duration> {
    TIMERS.with(|t| {
        t.borrow()
            .tasks
            .values()
            .map(|task| task.deadline.saturating_duration_since(now))
            .min()
    })
}

/// Run every task whose deadline has passed. Returns the number fired.
///
/// Callbacks run outside the registry borrow. A task cancelled from within
/// a callback (its own or another's) does not fire again; repeating tasks
/// are re-armed relative to `now` to avoid burst catch-up after a stall.
pub fn run_due(now: Instant) -> usize {
    let due: Vec<(usize, Callback)> = TIMERS.with(|t| {
        let mut state = t.borrow_mut();
        let ids: Vec<usize> = state
            .tasks
            .iter()
            .filter(|(_, task)| task.deadline <= now && task.callback.is_some())
            .map(|(&id, _)| id)
            .collect();

        ids.into_iter()
            .filter_map(|id| {
                state
                    .tasks
                    .get_mut(&id)
                    .and_then(|task| task.callback.take())
                    .map(|cb| (id, cb))
            })
            .collect()
    });

    let mut fired = 0;
    for (id, mut callback) in due {
        callback();
        fired += 1;

        TIMERS.with(|t| {
            let mut state = t.borrow_mut();
            // Cancelled while running: the entry is gone, drop the callback.
            let Some(task) = state.tasks.get_mut(&id) else {
                return;
            };
            match task.interval {
                Some(interval) => {
                    task.deadline = now + interval;
                    task.callback = Some(callback);
                }
                None => {
                    state.tasks.remove(&id);
                }
            }
        });
    }
    fired
}

/// Number of scheduled tasks (for tests).
pub fn active_count() -> usize {
    TIMERS.with(|t| t.borrow().tasks.len())
}

/// Drop all tasks (for tests).
pub fn reset_timers() {
    TIMERS.with(|t| {
        t.borrow_mut().tasks.clear();
    });
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_timers();
    }

    #[test]
    fn test_once_fires_at_deadline() {
        setup();
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();

        let handle = schedule_once(Duration::from_millis(10), move || {
            fired2.set(fired2.get() + 1);
        });

        // Not yet due.
        run_due(Instant::now());
        assert_eq!(fired.get(), 0);
        assert!(handle.is_scheduled());

        // Past the deadline.
        run_due(Instant::now() + Duration::from_millis(20));
        assert_eq!(fired.get(), 1);
        assert!(!handle.is_scheduled());

        // One-shot never fires twice.
        run_due(Instant::now() + Duration::from_secs(1));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_interval_rearms() {
        setup();
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();

        let _handle = schedule_interval(Duration::from_millis(10), move || {
            fired2.set(fired2.get() + 1);
        });

        let mut now = Instant::now();
        for _ in 0..3 {
            now += Duration::from_millis(11);
            run_due(now);
        }
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn test_drop_cancels() {
        setup();
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();

        let handle = schedule_once(Duration::from_millis(1), move || {
            fired2.set(fired2.get() + 1);
        });
        drop(handle);

        run_due(Instant::now() + Duration::from_secs(1));
        assert_eq!(fired.get(), 0);
        assert_eq!(active_count(), 0);
    }

    #[test]
    fn test_cancel_from_inside_callback() {
        setup();
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));
        let slot2 = slot.clone();

        let handle = schedule_interval(Duration::from_millis(5), move || {
            fired2.set(fired2.get() + 1);
            // Self-cancel on first fire.
            if let Some(h) = slot2.borrow_mut().take() {
                h.cancel();
            }
        });
        *slot.borrow_mut() = Some(handle);

        let mut now = Instant::now();
        for _ in 0..3 {
            now += Duration::from_millis(6);
            run_due(now);
        }
        assert_eq!(fired.get(), 1);
        assert_eq!(active_count(), 0);
    }

    #[test]
    fn test_schedule_from_inside_callback() {
        setup();
        let fired = Rc::new(Cell::new(0));
        let fired2 = fired.clone();
        let keep: Rc<RefCell<Vec<TimerHandle>>> = Rc::new(RefCell::new(Vec::new()));
        let keep2 = keep.clone();

        let _handle = schedule_once(Duration::from_millis(1), move || {
            let fired3 = fired2.clone();
            let inner = schedule_once(Duration::from_millis(1), move || {
                fired3.set(fired3.get() + 1);
            });
            keep2.borrow_mut().push(inner);
        });

        run_due(Instant::now() + Duration::from_millis(2));
        assert_eq!(fired.get(), 0);
        run_due(Instant::now() + Duration::from_millis(10));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_next_deadline() {
        setup();
        let now = Instant::now();
        assert!(next_deadline(now).is_none());

        let _a = schedule_once(Duration::from_millis(50), || {});
        let _b = schedule_once(Duration::from_millis(10), || {});

        let wait = next_deadline(now).unwrap();
        assert!(wait <= Duration::from_millis(11));

        // Already-due task reports zero.
        let late = now + Duration::from_millis(100);
        assert_eq!(next_deadline(late), Some(Duration::ZERO));
    }
}
