//! Effects - tick-driven text animations and scroll-linked reveals.
//!
//! Every effect here is a pure state machine: it owns no timer and performs
//! no I/O. The page wires each one to the timer registry (for ticks) or to
//! scroll events (for reveals) and redraws from the resulting state.

pub mod decrypt;
pub mod glyphs;
pub mod reveal;
pub mod typewriter;

pub use decrypt::DecryptEffect;
pub use glyphs::{GlyphSource, SCRAMBLE_ALPHABET};
pub use reveal::{reveal_progress, RevealBlock};
pub use typewriter::{TypewriterEffect, TypewriterPhase};
