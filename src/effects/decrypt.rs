//! Decrypt effect - morphs a string from random glyphs to its final value.
//!
//! Pure tick-driven state machine: the caller owns the clock and calls
//! [`DecryptEffect::tick`] once per interval. Each tick re-scrambles every
//! position not yet revealed, then advances the reveal counter by half a
//! character. Full reveal therefore takes two ticks per character, which is
//! the intended visual pace.
//!
//! # Example
//!
//! ```ignore
//! let mut effect = DecryptEffect::new("TRISHIT", GlyphSource::new());
//! while !effect.is_complete() {
//!     effect.tick();
//!     draw(effect.display());
//! }
//! ```

use super::glyphs::GlyphSource;

/// Reveal counter advance per tick, in characters.
const REVEAL_PER_TICK: f32 = 0.5;

// =============================================================================
// DecryptEffect
// =============================================================================

pub struct DecryptEffect {
    target: Vec<char>,
    display: Vec<char>,
    iteration: f32,
    complete: bool,
    source: GlyphSource,
}

impl DecryptEffect {
    /// Start a new effect. The display begins fully scrambled; an empty
    /// target completes immediately with no ticks.
    pub fn new(target: &str, source: GlyphSource) -> Self {
        let mut effect = Self {
            target: target.chars().collect(),
            display: Vec::new(),
            iteration: 0.0,
            complete: false,
            source,
        };
        effect.rescramble();
        effect
    }

    /// Restart with a new target from a fresh scramble. Used when the target
    /// changes while the effect is in flight.
    pub fn restart(&mut self, target: &str) {
        self.target = target.chars().collect();
        self.iteration = 0.0;
        self.complete = false;
        self.rescramble();
    }

    fn rescramble(&mut self) {
        if self.target.is_empty() {
            self.display.clear();
            self.complete = true;
            return;
        }
        self.display = (0..self.target.len())
            .map(|_| self.source.next_glyph())
            .collect();
    }

    /// Advance one tick. Returns false once complete (no further changes).
    pub fn tick(&mut self) -> bool {
        if self.complete {
            return false;
        }

        let revealed = self.iteration.floor() as usize;
        for (k, slot) in self.display.iter_mut().enumerate() {
            *slot = if k < revealed {
                self.target[k]
            } else {
                self.source.next_glyph()
            };
        }

        self.iteration += REVEAL_PER_TICK;
        if self.iteration.floor() as usize >= self.target.len() {
            self.display.clone_from(&self.target);
            self.complete = true;
        }
        true
    }

    /// Current display string.
    pub fn display(&self) -> String {
        self.display.iter().collect()
    }

    /// True once the display has settled on the target.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

// =============================================================================
// Tests
// =============================================================================
