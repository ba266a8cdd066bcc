//! Typewriter effect - reveals a string one character at a time.
//!
//! Visibility-gated: the effect stays dormant until the caller reports the
//! element intersecting the viewport, then emits one character per step. The
//! completion callback is stored as a `FnOnce` and taken on the transition to
//! `Done`, so it structurally cannot fire twice. The caret blink is a
//! separate concern (see [`crate::state::blink`]); this module only says
//! whether a caret should be shown at all.

/// Fraction of the element that must be visible before typing starts.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

// =============================================================================
// TypewriterEffect
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// Waiting for the element to become visible.
    Dormant,
    /// Emitting one character per step.
    Running,
    /// All characters emitted, callback fired.
    Done,
}

pub struct TypewriterEffect {
    target: Vec<char>,
    emitted: usize,
    phase: TypewriterPhase,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl TypewriterEffect {
    pub fn new(target: &str, on_complete: impl FnOnce() + 'static) -> Self {
        Self {
            target: target.chars().collect(),
            emitted: 0,
            phase: TypewriterPhase::Dormant,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    /// Report the visible fraction of the element. Starts the effect the
    /// first time the fraction reaches the threshold; returns true when that
    /// transition happens so the caller knows to schedule step timers.
    pub fn observe_visibility(&mut self, fraction: f32) -> bool {
        if self.phase != TypewriterPhase::Dormant || fraction < VISIBILITY_THRESHOLD {
            return false;
        }
        self.phase = TypewriterPhase::Running;
        if self.target.is_empty() {
            self.finish();
        }
        true
    }

    /// Emit the next character. Returns true while more steps remain (the
    /// caller should schedule another step after the per-character delay).
    pub fn step(&mut self) -> bool {
        if self.phase != TypewriterPhase::Running {
            return false;
        }
        self.emitted += 1;
        if self.emitted >= self.target.len() {
            self.finish();
            return false;
        }
        true
    }

    fn finish(&mut self) {
        self.phase = TypewriterPhase::Done;
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    /// Characters emitted so far.
    pub fn display(&self) -> String {
        self.target[..self.emitted].iter().collect()
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == TypewriterPhase::Done
    }

    /// Whether a caret belongs after the emitted text. The caret blinks on
    /// the shared 500 ms clock while dormant or running and disappears once
    /// done.
    pub fn shows_caret(&self) -> bool {
        self.phase != TypewriterPhase::Done
    }
}

// =============================================================================
// Tests
// =============================================================================
