//! Challenge providers - the human-verification capability behind the gate.
//!
//! The gate core only sees this trait: a provider hands out a prompt, judges
//! a response, and can always be reset to a fresh challenge. Tokens are
//! opaque; nothing in this crate inspects them.

use std::time::{Duration, Instant};

use crate::effects::{GlyphSource, SCRAMBLE_ALPHABET};

/// Opaque proof of a passed challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeToken(String);

impl ChallengeToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Result of judging a challenge response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    Succeeded(ChallengeToken),
    Failed,
    Expired,
}

pub trait ChallengeProvider {
    /// Discard any in-flight challenge and issue a fresh one. Any token the
    /// old challenge could have produced is invalidated.
    fn reset(&mut self, now: Instant);

    /// Text shown to the user describing what to do.
    fn prompt(&self) -> &str;

    /// Judge a response against the current challenge.
    fn submit(&mut self, input: &str, now: Instant) -> ChallengeOutcome;
}

// =============================================================================
// TypedPhraseProvider
// =============================================================================

/// Challenge time limit.
pub const CHALLENGE_TTL: Duration = Duration::from_secs(60);

const PHRASE_LEN: usize = 6;

/// A keyboard-friendly verification step: retype a short random glyph
/// phrase within the time limit. Matching is case-sensitive.
pub struct TypedPhraseProvider {
    phrase: String,
    prompt: String,
    issued_at: Option<Instant>,
    nonce: u64,
    source: GlyphSource,
}

impl TypedPhraseProvider {
    pub fn new() -> Self {
        Self::with_source(GlyphSource::new())
    }

    pub fn with_source(source: GlyphSource) -> Self {
        Self {
            phrase: String::new(),
            prompt: String::new(),
            issued_at: None,
            nonce: 0,
            source,
        }
    }

    /// The phrase the user must retype. Empty until the first reset.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

impl Default for TypedPhraseProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeProvider for TypedPhraseProvider {
    fn reset(&mut self, now: Instant) {
        self.phrase = (0..PHRASE_LEN).map(|_| self.source.next_glyph()).collect();
        self.prompt = format!("TYPE THE SEQUENCE: {}", self.phrase);
        self.issued_at = Some(now);
        self.nonce += 1;
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn submit(&mut self, input: &str, now: Instant) -> ChallengeOutcome {
        let Some(issued_at) = self.issued_at else {
            return ChallengeOutcome::Failed;
        };
        if now.duration_since(issued_at) > CHALLENGE_TTL {
            return ChallengeOutcome::Expired;
        }
        if input == self.phrase {
            ChallengeOutcome::Succeeded(ChallengeToken::new(format!("phrase-{}", self.nonce)))
        } else {
            ChallengeOutcome::Failed
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TypedPhraseProvider {
        TypedPhraseProvider::with_source(GlyphSource::seeded(SCRAMBLE_ALPHABET, 9))
    }

    #[test]
    fn test_correct_phrase_succeeds() {
        let mut p = provider();
        let now = Instant::now();
        p.reset(now);
        let phrase = p.phrase().to_string();
        assert!(matches!(
            p.submit(&phrase, now),
            ChallengeOutcome::Succeeded(_)
        ));
    }

    #[test]
    fn test_wrong_phrase_fails() {
        let mut p = provider();
        let now = Instant::now();
        p.reset(now);
        assert_eq!(p.submit("nope", now), ChallengeOutcome::Failed);
    }

    #[test]
    fn test_submit_before_reset_fails() {
        let mut p = provider();
        assert_eq!(p.submit("", Instant::now()), ChallengeOutcome::Failed);
    }

    #[test]
    fn test_expiry_after_ttl() {
        let mut p = provider();
        let now = Instant::now();
        p.reset(now);
        let phrase = p.phrase().to_string();
        let late = now + CHALLENGE_TTL + Duration::from_secs(1);
        assert_eq!(p.submit(&phrase, late), ChallengeOutcome::Expired);
    }

    #[test]
    fn test_reset_invalidates_old_phrase() {
        let mut p = provider();
        let now = Instant::now();
        p.reset(now);
        let old = p.phrase().to_string();
        p.reset(now);
        if old != p.phrase() {
            assert_eq!(p.submit(&old, now), ChallengeOutcome::Failed);
        }
        // The fresh phrase always works.
        let fresh = p.phrase().to_string();
        assert!(matches!(
            p.submit(&fresh, now),
            ChallengeOutcome::Succeeded(_)
        ));
    }

    #[test]
    fn test_prompt_contains_phrase() {
        let mut p = provider();
        p.reset(Instant::now());
        assert!(p.prompt().contains(p.phrase()));
    }

    #[test]
    fn test_phrase_uses_scramble_alphabet() {
        let mut p = provider();
        p.reset(Instant::now());
        for ch in p.phrase().chars() {
            assert!(SCRAMBLE_ALPHABET.contains(ch));
        }
    }
}
