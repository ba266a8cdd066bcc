//! Glyph source - uniform random characters for text scrambling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Alphabet used by the decrypt effect while characters are still scrambled.
pub const SCRAMBLE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789$#@%&";

// =============================================================================
// GlyphSource
// =============================================================================

/// Produces uniformly random characters from a fixed alphabet.
///
/// Seedable so animations can be replayed deterministically in tests.
pub struct GlyphSource {
    alphabet: Vec<char>,
    rng: StdRng,
}

impl GlyphSource {
    /// Create a source over the standard scramble alphabet.
    pub fn new() -> Self {
        Self::with_alphabet(SCRAMBLE_ALPHABET)
    }

    /// Create a source over a custom alphabet. The alphabet must be non-empty.
    pub fn with_alphabet(alphabet: &str) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic source from a seed.
    pub fn seeded(alphabet: &str, seed: u64) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample one glyph uniformly.
    pub fn next_glyph(&mut self) -> char {
        let index = self.rng.gen_range(0..self.alphabet.len());
        self.alphabet[index]
    }
}

impl Default for GlyphSource {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_come_from_alphabet() {
        let mut source = GlyphSource::with_alphabet("AB01");
        for _ in 0..100 {
            let glyph = source.next_glyph();
            assert!("AB01".contains(glyph));
        }
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut a = GlyphSource::seeded(SCRAMBLE_ALPHABET, 7);
        let mut b = GlyphSource::seeded(SCRAMBLE_ALPHABET, 7);
        for _ in 0..50 {
            assert_eq!(a.next_glyph(), b.next_glyph());
        }
    }

    #[test]
    fn test_single_char_alphabet() {
        let mut source = GlyphSource::with_alphabet("X");
        for _ in 0..10 {
            assert_eq!(source.next_glyph(), 'X');
        }
    }

    #[test]
    fn test_standard_alphabet_covers_all_classes() {
        assert!(SCRAMBLE_ALPHABET.contains('A'));
        assert!(SCRAMBLE_ALPHABET.contains('9'));
        assert!(SCRAMBLE_ALPHABET.contains('$'));
        assert_eq!(SCRAMBLE_ALPHABET.chars().count(), 41);
    }
}
