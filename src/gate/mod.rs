//! Disclosure gate - verification-gated access to the contact address.
//!
//! The address actions (open a mail client, copy to clipboard) only run
//! after the user passes a challenge, and at most once per request. The gate
//! never touches the challenge provider's internals; it reacts to the three
//! outcome events and drives the modal state.

pub mod address;
pub mod provider;

use std::time::Instant;

use log::{debug, info};

use crate::render::ansi;
use crate::render::output::OutputBuffer;

pub use address::{contact_address, launch_url};
pub use provider::{ChallengeOutcome, ChallengeProvider, ChallengeToken, TypedPhraseProvider};

/// How long the "copied" confirmation stays on screen.
pub const COPIED_INDICATOR_MS: u64 = 3000;

// =============================================================================
// Types
// =============================================================================

/// What the user asked the gate to do with the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureAction {
    SendEmail,
    CopyAddress,
}

/// Inline error shown in the modal after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    ChallengeFailed,
    ChallengeExpired,
}

/// Where the gate's side effects land. The production sink launches the
/// mail client and writes the system clipboard; tests record calls.
pub trait ActionSink {
    /// Returns true if the mail client launch was handed off.
    fn send_email(&mut self, address: &str) -> bool;
    /// Returns true if the address reached the clipboard.
    fn copy_address(&mut self, address: &str) -> bool;
}

/// Default sink backed by the OS opener and the clipboard module.
pub struct SystemSink;

impl ActionSink for SystemSink {
    fn send_email(&mut self, address: &str) -> bool {
        address::launch_mailto(address)
    }

    fn copy_address(&mut self, address: &str) -> bool {
        let ok = crate::state::clipboard::copy(address);
        if ok {
            // Best-effort OSC 52 so the host terminal's clipboard gets the
            // address too; terminals that ignore it still have the internal
            // buffer.
            let mut out = OutputBuffer::new();
            if ansi::osc52_copy(&mut out, address).is_ok() {
                if let Err(err) = out.flush_stdout() {
                    debug!("OSC 52 clipboard write failed: {err}");
                }
            }
        }
        ok
    }
}

// =============================================================================
// DisclosureGate
// =============================================================================

pub struct DisclosureGate<P: ChallengeProvider, S: ActionSink> {
    provider: P,
    sink: S,
    address: String,
    verified: bool,
    pending: Option<DisclosureAction>,
    modal_open: bool,
    error: Option<GateError>,
    copied: bool,
}

impl DisclosureGate<TypedPhraseProvider, SystemSink> {
    /// Gate over the embedded contact address with the default provider
    /// and system side effects.
    pub fn new() -> Self {
        Self::with_parts(TypedPhraseProvider::new(), SystemSink, contact_address())
    }
}

impl Default for DisclosureGate<TypedPhraseProvider, SystemSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ChallengeProvider, S: ActionSink> DisclosureGate<P, S> {
    pub fn with_parts(provider: P, sink: S, address: String) -> Self {
        Self {
            provider,
            sink,
            address,
            verified: false,
            pending: None,
            modal_open: false,
            error: None,
            copied: false,
        }
    }

    /// User asked for an address action. Runs it immediately when already
    /// verified; otherwise records it and opens the verification modal with
    /// a fresh challenge.
    pub fn request_disclosure(&mut self, action: DisclosureAction, now: Instant) {
        if self.verified {
            self.perform(action);
            return;
        }
        debug!("disclosure requested, opening verification modal");
        self.pending = Some(action);
        self.error = None;
        self.modal_open = true;
        self.provider.reset(now);
    }

    /// Judge a typed response and route the outcome. Convenience over
    /// calling the three event handlers directly.
    pub fn submit_challenge(&mut self, input: &str, now: Instant) {
        match self.provider.submit(input, now) {
            ChallengeOutcome::Succeeded(token) => self.on_challenge_succeeded(token),
            ChallengeOutcome::Failed => self.on_challenge_failed(now),
            ChallengeOutcome::Expired => self.on_challenge_expired(now),
        }
    }

    /// Successful verification: mark verified, run the pending action once,
    /// close the modal. The token is opaque and only logged.
    pub fn on_challenge_succeeded(&mut self, token: ChallengeToken) {
        info!("verification succeeded ({token:?})");
        self.verified = true;
        self.error = None;
        self.modal_open = false;
        if let Some(action) = self.pending.take() {
            self.perform(action);
        }
    }

    /// Failed attempt: surface the inline error and issue a fresh challenge
    /// so the user can retry. Verification stays unset.
    pub fn on_challenge_failed(&mut self, now: Instant) {
        self.error = Some(GateError::ChallengeFailed);
        self.provider.reset(now);
    }

    /// Expired challenge: same recovery path as a failure.
    pub fn on_challenge_expired(&mut self, now: Instant) {
        self.error = Some(GateError::ChallengeExpired);
        self.provider.reset(now);
    }

    /// Close without verifying. The pending action survives so re-opening
    /// resumes where the user left off, but the in-flight challenge is
    /// reset so a stale response cannot verify later.
    pub fn close_modal(&mut self, now: Instant) {
        self.modal_open = false;
        self.error = None;
        self.provider.reset(now);
    }

    fn perform(&mut self, action: DisclosureAction) {
        let address = self.address.clone();
        match action {
            DisclosureAction::SendEmail => {
                self.sink.send_email(&address);
            }
            DisclosureAction::CopyAddress => {
                // A denied clipboard simply shows no confirmation.
                self.copied = self.sink.copy_address(&address);
            }
        }
    }

    // ----- accessors -----

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn pending_action(&self) -> Option<DisclosureAction> {
        self.pending
    }

    pub fn error(&self) -> Option<GateError> {
        self.error
    }

    pub fn challenge_prompt(&self) -> &str {
        self.provider.prompt()
    }

    /// True while the "copied" confirmation should be visible. The page
    /// schedules a timer to clear it after [`COPIED_INDICATOR_MS`].
    pub fn copied_indicator(&self) -> bool {
        self.copied
    }

    pub fn clear_copied_indicator(&mut self) {
        self.copied = false;
    }

    /// The decoded address, shown only once verified.
    pub fn revealed_address(&self) -> Option<&str> {
        self.verified.then_some(self.address.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSink {
        emails: Rc<RefCell<Vec<String>>>,
        copies: Rc<RefCell<Vec<String>>>,
        deny_clipboard: bool,
    }

    impl ActionSink for RecordingSink {
        fn send_email(&mut self, address: &str) -> bool {
            self.emails.borrow_mut().push(address.to_string());
            true
        }

        fn copy_address(&mut self, address: &str) -> bool {
            if self.deny_clipboard {
                return false;
            }
            self.copies.borrow_mut().push(address.to_string());
            true
        }
    }

    struct FixedProvider {
        answer: &'static str,
        prompt: String,
        resets: u32,
    }

    impl FixedProvider {
        fn new(answer: &'static str) -> Self {
            Self {
                answer,
                prompt: String::new(),
                resets: 0,
            }
        }
    }

    impl ChallengeProvider for FixedProvider {
        fn reset(&mut self, _now: Instant) {
            self.resets += 1;
            self.prompt = format!("challenge #{}", self.resets);
        }

        fn prompt(&self) -> &str {
            &self.prompt
        }

        fn submit(&mut self, input: &str, _now: Instant) -> ChallengeOutcome {
            if input == self.answer {
                ChallengeOutcome::Succeeded(ChallengeToken::new("tok"))
            } else {
                ChallengeOutcome::Failed
            }
        }
    }

    fn gate() -> (
        DisclosureGate<FixedProvider, RecordingSink>,
        Rc<RefCell<Vec<String>>>,
        Rc<RefCell<Vec<String>>>,
    ) {
        let sink = RecordingSink::default();
        let emails = sink.emails.clone();
        let copies = sink.copies.clone();
        let gate = DisclosureGate::with_parts(
            FixedProvider::new("ok"),
            sink,
            "someone@example.com".to_string(),
        );
        (gate, emails, copies)
    }

    #[test]
    fn test_unverified_request_opens_modal_without_acting() {
        let (mut gate, emails, copies) = gate();
        gate.request_disclosure(DisclosureAction::CopyAddress, Instant::now());

        assert!(gate.modal_open());
        assert!(!gate.is_verified());
        assert_eq!(gate.pending_action(), Some(DisclosureAction::CopyAddress));
        assert!(copies.borrow().is_empty());
        assert!(emails.borrow().is_empty());
    }

    #[test]
    fn test_success_runs_pending_action_once() {
        let (mut gate, _, copies) = gate();
        let now = Instant::now();
        gate.request_disclosure(DisclosureAction::CopyAddress, now);
        gate.submit_challenge("ok", now);

        assert!(gate.is_verified());
        assert!(!gate.modal_open());
        assert_eq!(gate.pending_action(), None);
        assert_eq!(copies.borrow().as_slice(), ["someone@example.com"]);
        assert!(gate.copied_indicator());
    }

    #[test]
    fn test_fail_fail_succeed_acts_exactly_once() {
        let (mut gate, _, copies) = gate();
        let now = Instant::now();
        gate.request_disclosure(DisclosureAction::CopyAddress, now);

        gate.submit_challenge("wrong", now);
        assert_eq!(gate.error(), Some(GateError::ChallengeFailed));
        assert!(copies.borrow().is_empty());

        gate.submit_challenge("still wrong", now);
        assert!(copies.borrow().is_empty());
        assert!(!gate.is_verified());

        gate.submit_challenge("ok", now);
        assert_eq!(copies.borrow().len(), 1);
        assert!(gate.is_verified());
        assert_eq!(gate.error(), None);
    }

    #[test]
    fn test_verified_request_acts_immediately() {
        let (mut gate, emails, _) = gate();
        let now = Instant::now();
        gate.request_disclosure(DisclosureAction::CopyAddress, now);
        gate.submit_challenge("ok", now);

        gate.request_disclosure(DisclosureAction::SendEmail, now);
        assert!(!gate.modal_open());
        assert_eq!(emails.borrow().as_slice(), ["someone@example.com"]);
    }

    #[test]
    fn test_failure_issues_fresh_challenge() {
        let (mut gate, _, _) = gate();
        let now = Instant::now();
        gate.request_disclosure(DisclosureAction::SendEmail, now);
        let first = gate.challenge_prompt().to_string();
        gate.submit_challenge("wrong", now);
        assert_ne!(gate.challenge_prompt(), first);
    }

    #[test]
    fn test_close_modal_preserves_pending_and_resets_challenge() {
        let (mut gate, _, copies) = gate();
        let now = Instant::now();
        gate.request_disclosure(DisclosureAction::CopyAddress, now);
        let before_close = gate.challenge_prompt().to_string();
        gate.close_modal(now);

        assert!(!gate.modal_open());
        assert_eq!(gate.pending_action(), Some(DisclosureAction::CopyAddress));
        assert!(copies.borrow().is_empty());

        // Re-opening issues yet another challenge.
        gate.request_disclosure(DisclosureAction::CopyAddress, now);
        assert!(gate.modal_open());
        assert_ne!(gate.challenge_prompt(), before_close);
    }

    #[test]
    fn test_denied_clipboard_shows_no_confirmation() {
        let sink = RecordingSink {
            deny_clipboard: true,
            ..Default::default()
        };
        let mut gate = DisclosureGate::with_parts(
            FixedProvider::new("ok"),
            sink,
            "someone@example.com".to_string(),
        );
        let now = Instant::now();
        gate.request_disclosure(DisclosureAction::CopyAddress, now);
        gate.submit_challenge("ok", now);

        assert!(gate.is_verified());
        assert!(!gate.copied_indicator());
    }

    #[test]
    fn test_address_revealed_only_after_verification() {
        let (mut gate, _, _) = gate();
        let now = Instant::now();
        assert_eq!(gate.revealed_address(), None);
        gate.request_disclosure(DisclosureAction::SendEmail, now);
        assert_eq!(gate.revealed_address(), None);
        gate.submit_challenge("ok", now);
        assert_eq!(gate.revealed_address(), Some("someone@example.com"));
    }
}
