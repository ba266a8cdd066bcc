//! State - timers, blink clocks, viewport, pointer, clipboard, and input.
//!
//! Everything in this layer is single-threaded and backed by thread-local
//! registries. Time enters the system exclusively through the timer registry:
//! the event loop asks [`timers::next_deadline`] how long it may sleep in
//! `poll`, then calls [`timers::run_due`] when it wakes.

pub mod blink;
pub mod clipboard;
pub mod input;
pub mod pointer;
pub mod timers;
pub mod viewport;
