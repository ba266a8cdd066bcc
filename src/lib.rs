//! # termfolio
//!
//! Animated single-page portfolio for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Every animation is a pure state machine driven by the thread-local timer
//! registry; signals carry the rest of the frame's inputs. The rendering
//! pipeline is purely derived-based:
//! ```text
//! Page state + signals → frame derived → render effect → diff renderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (RGBA, Cell, Attr, ClipRect)
//! - [`effects`] - Decrypt, typewriter, and scroll-reveal engines
//! - [`overlay`] - Pointer grid/crosshair decoration
//! - [`gate`] - Verification-gated contact address disclosure
//! - [`catalog`] - The static project records and detail view
//! - [`render`] - Frame buffer, ANSI output, diff rendering
//! - [`state`] - Timers, blink clocks, viewport, pointer, clipboard, input
//! - [`app`] - Page composition and the event loop

pub mod app;
pub mod catalog;
pub mod effects;
pub mod gate;
pub mod overlay;
pub mod render;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use effects::{
    reveal_progress, DecryptEffect, GlyphSource, RevealBlock, TypewriterEffect, TypewriterPhase,
    SCRAMBLE_ALPHABET,
};

pub use render::{
    string_width, truncate_text, wrap_text, BorderStyle, DiffRenderer, FrameBuffer, OutputBuffer,
};

pub use gate::{
    contact_address, ChallengeOutcome, ChallengeProvider, ChallengeToken, DisclosureAction,
    DisclosureGate, GateError, TypedPhraseProvider, COPIED_INDICATOR_MS,
};

pub use catalog::{Project, ProjectCatalog};

pub use overlay::draw_overlay;

pub use state::blink::{blink_phase, reset_blink_state, subscribe_to_blink, CARET_BLINK_MS};
pub use state::timers::{
    next_deadline, reset_timers, run_due, schedule_interval, schedule_once, TimerHandle,
};
pub use state::viewport::{
    reset_viewport_state, scroll_by, scroll_offset, set_content_height, set_terminal_size,
    terminal_height, terminal_width,
};

pub use theme::{
    active_theme, reset_theme_state, set_theme, t, toggle_theme, Theme, ThemeAccessor,
};

pub use app::{App, AppConfig, ThemeChoice};
