//! App - page state, reactive render pipeline, and the event loop.
//!
//! Composition follows one rule: effects are pure state machines, signals
//! carry everything the frame depends on, and the single render effect is
//! the only place that touches the terminal. Non-signal page state (the
//! effects, the gate, the catalog) lives behind one `Rc<RefCell<Page>>`;
//! an epoch signal is bumped whenever that state changes so the frame
//! derived re-runs.

pub mod sections;

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;
use spark_signals::{derived, effect, signal, Signal};

use crate::effects::{
    reveal_progress, DecryptEffect, GlyphSource, RevealBlock, TypewriterEffect,
};
use crate::gate::{
    launch_url, DisclosureAction, DisclosureGate, SystemSink, TypedPhraseProvider,
    COPIED_INDICATOR_MS,
};
use crate::catalog::ProjectCatalog;
use crate::overlay::draw_overlay;
use crate::render::{DiffRenderer, FrameBuffer};
use crate::state::blink::{self, CARET_BLINK_MS};
use crate::state::input::{self, InputEvent, Key, KeyPress, PointerEvent, PointerKind};
use crate::state::{pointer, timers, viewport};
use crate::theme::{active_theme, presets, set_theme, toggle_theme};

use sections::PageLayout;

/// Hero name lines tick at different rates, like two terminals decrypting
/// side by side.
const HERO_FIRST_TICK_MS: u64 = 30;
const HERO_SECOND_TICK_MS: u64 = 50;

/// Terminal prompt typing speed.
const TERMINAL_TYPE_MS: u64 = 40;

/// Delays for the staged terminal lines after typing completes. The second
/// and third lines land before the first; the original staging kept that
/// quirk and so does this one.
const STAGE_DELAYS_MS: [u64; 4] = [200, 100, 110, 120];

const ABOUT_TEXT: &str = "I am an Electrical Engineer\n\
obsessed with Robotics and AI.\n\
I don't just write code;\n\
I weld logic to metal.\n\
Specialized in embedded systems,\n\
computer vision, and\n\
autonomous navigation.";

const TERMINAL_COMMAND: &str = "./contact.sh --initiate";

/// External profile links, launched straight from key presses (ungated,
/// unlike the contact address).
const GITHUB_URL: &str = "https://github.com/DevVortex504";
const LINKEDIN_URL: &str = "https://www.linkedin.com/in/trishit-debsharma";

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
}

/// Startup configuration, filled from the command line.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub theme: ThemeChoice,
    pub overlay: bool,
    /// Animation speed multiplier. 2.0 halves every tick interval.
    pub speed: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Dark,
            overlay: true,
            speed: 1.0,
        }
    }
}

impl AppConfig {
    fn scaled(&self, base_ms: u64) -> Duration {
        let speed = if self.speed > 0.0 { self.speed } else { 1.0 };
        Duration::from_millis(((base_ms as f32 / speed).round() as u64).max(1))
    }
}

// =============================================================================
// Page state
// =============================================================================

/// Which staged terminal lines have appeared.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactStage {
    pub line1: bool,
    pub line2: bool,
    pub line3: bool,
    pub buttons: bool,
}

/// All non-signal page state. Everything the frame reads lives here or in
/// a signal.
pub struct Page {
    pub hero_first: DecryptEffect,
    pub hero_second: DecryptEffect,
    pub about: RevealBlock,
    pub about_progress: f32,
    pub terminal: TypewriterEffect,
    pub contact_stage: Rc<RefCell<ContactStage>>,
    pub gate: DisclosureGate<TypedPhraseProvider, SystemSink>,
    pub catalog: ProjectCatalog,
    pub challenge_input: String,
    pub overlay_enabled: bool,

    hero_first_timer: Option<timers::TimerHandle>,
    hero_second_timer: Option<timers::TimerHandle>,
    type_timer: Option<timers::TimerHandle>,
    /// Shared with the typewriter completion callback, which fills it with
    /// the staged-line one-shots. Handles must outlive their deadlines.
    stage_timers: Rc<RefCell<Vec<timers::TimerHandle>>>,
    copied_timer: Option<timers::TimerHandle>,
}

impl Page {
    fn new(config: &AppConfig, epoch: Signal<u64>) -> Rc<RefCell<Self>> {
        let contact_stage = Rc::new(RefCell::new(ContactStage::default()));

        // The completion callback stages the follow-up lines. Timer handles
        // are parked in the page afterwards so they stay alive.
        let stage_for_callback = Rc::clone(&contact_stage);
        let epoch_for_callback = epoch;
        let staged: Rc<RefCell<Vec<timers::TimerHandle>>> = Rc::new(RefCell::new(Vec::new()));
        let staged_for_callback = Rc::clone(&staged);
        let speed = config.speed;
        let on_complete = move || {
            debug!("terminal typing complete, staging output lines");
            let scale = |ms: u64| {
                let s = if speed > 0.0 { speed } else { 1.0 };
                Duration::from_millis(((ms as f32 / s).round() as u64).max(1))
            };
            let setters: [(u64, fn(&mut ContactStage)); 4] = [
                (STAGE_DELAYS_MS[0], |s| s.line1 = true),
                (STAGE_DELAYS_MS[1], |s| s.line2 = true),
                (STAGE_DELAYS_MS[2], |s| s.line3 = true),
                (STAGE_DELAYS_MS[3], |s| s.buttons = true),
            ];
            for (delay, set) in setters {
                let stage = Rc::clone(&stage_for_callback);
                let epoch = epoch_for_callback.clone();
                let handle = timers::schedule_once(scale(delay), move || {
                    set(&mut stage.borrow_mut());
                    bump(&epoch);
                });
                staged_for_callback.borrow_mut().push(handle);
            }
        };

        Rc::new(RefCell::new(Self {
            hero_first: DecryptEffect::new("TRISHIT", GlyphSource::new()),
            hero_second: DecryptEffect::new("DEBSHARMA", GlyphSource::new()),
            about: RevealBlock::new(ABOUT_TEXT),
            about_progress: 0.0,
            terminal: TypewriterEffect::new(TERMINAL_COMMAND, on_complete),
            contact_stage,
            gate: DisclosureGate::new(),
            catalog: ProjectCatalog::builtin(),
            challenge_input: String::new(),
            overlay_enabled: config.overlay,
            hero_first_timer: None,
            hero_second_timer: None,
            type_timer: None,
            stage_timers: staged,
            copied_timer: None,
        }))
    }
}

fn bump(epoch: &Signal<u64>) {
    epoch.set(epoch.get() + 1);
}

// =============================================================================
// Terminal guard
// =============================================================================

/// Owns the terminal takeover (alternate screen, raw mode, mouse capture).
///
/// Restoration runs on drop, so a panic anywhere in the event loop still
/// hands the user back a usable shell. The orderly path goes through
/// [`TerminalGuard::release`], which surfaces errors instead of eating them.
struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    fn acquire(renderer: &mut DiffRenderer) -> io::Result<Self> {
        renderer.enter_fullscreen()?;
        crossterm::terminal::enable_raw_mode()?;
        input::enable_mouse()?;
        Ok(Self { restored: false })
    }

    fn restore_terminal() -> io::Result<()> {
        input::disable_mouse()?;
        crossterm::terminal::disable_raw_mode()?;
        // The live renderer is owned by the render effect; a fresh one
        // writes the same exit escapes.
        DiffRenderer::new().exit_fullscreen()
    }

    fn release(mut self) -> io::Result<()> {
        self.restored = true;
        Self::restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            // Best effort: unwinding already, nowhere to report.
            let _ = Self::restore_terminal();
        }
    }
}

// =============================================================================
// App
// =============================================================================

pub struct App {
    page: Rc<RefCell<Page>>,
    epoch: Signal<u64>,
    layout: Rc<Cell<PageLayout>>,
    config: AppConfig,
    quit: bool,
    stop_render: Option<Box<dyn FnOnce()>>,
    blink_unsub: Option<Box<dyn FnOnce()>>,
    terminal: Option<TerminalGuard>,
}

impl App {
    /// Build the page, wire the reactive pipeline, and take over the
    /// terminal.
    pub fn new(config: AppConfig) -> Result<Self> {
        match config.theme {
            ThemeChoice::Dark => set_theme(&presets::dark()),
            ThemeChoice::Light => set_theme(&presets::light()),
        }

        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        viewport::set_terminal_size(width, height);

        let epoch = signal(0u64);
        let page = Page::new(&config, epoch.clone());
        let layout = Rc::new(Cell::new(PageLayout::default()));

        // Frame derived: reads every signal the frame depends on, then
        // composes content + scrolled window + modal + overlay.
        let frame = {
            let page = Rc::clone(&page);
            let layout = Rc::clone(&layout);
            let epoch = epoch.clone();
            derived(move || {
                let _ = epoch.get();
                let theme = active_theme();
                let width = viewport::terminal_width();
                let height = viewport::terminal_height();
                let offset = viewport::scroll_offset();
                let blink = blink::blink_phase(CARET_BLINK_MS);
                let cursor = pointer::pointer_active()
                    .then(|| (pointer::pointer_x(), pointer::pointer_y()));

                let page = page.borrow();
                let (content, new_layout) = sections::draw_content(&page, &theme, width, blink);
                layout.set(new_layout);

                let mut screen = FrameBuffer::new(width, height);
                screen.clear(theme.background);
                for row in 0..height {
                    let src = row + offset;
                    for col in 0..width {
                        if let Some(cell) = content.get(col, src) {
                            screen.set(col, row, *cell);
                        }
                    }
                }

                if page.overlay_enabled {
                    draw_overlay(&mut screen, &theme, cursor);
                }
                if page.gate.modal_open() {
                    sections::draw_modal(&mut screen, &page, &theme, blink);
                }
                screen
            })
        };

        let mut renderer = DiffRenderer::new();
        let terminal = TerminalGuard::acquire(&mut renderer)?;

        // Subscribed before the first frame so the phase signal exists when
        // the derived reads it (a missing clock reads no signal at all).
        let blink_unsub = blink::subscribe_to_blink(CARET_BLINK_MS);

        // The ONE render effect.
        let stop_render = effect(move || {
            let screen = frame.get();
            if let Err(err) = renderer.render(&screen) {
                debug!("render failed: {err}");
            }
        });

        let mut app = Self {
            page,
            epoch,
            layout,
            config,
            quit: false,
            stop_render: Some(Box::new(stop_render)),
            blink_unsub: Some(blink_unsub),
            terminal: Some(terminal),
        };

        app.start_hero_decrypt();
        app.refresh_scroll_state();
        Ok(app)
    }

    /// Run until the user quits.
    pub fn run(&mut self) -> Result<()> {
        while !self.quit {
            let timeout = timers::next_deadline(Instant::now())
                .unwrap_or(Duration::from_millis(250))
                .min(Duration::from_millis(250));
            if let Some(event) = input::poll_event(timeout)? {
                self.handle_event(event);
            }
            // Timer callbacks bump the epoch themselves.
            timers::run_due(Instant::now());
        }
        Ok(())
    }

    /// Restore the terminal. Dropping every timer handle with the page
    /// guarantees no callback fires against torn-down state.
    pub fn shutdown(mut self) -> io::Result<()> {
        if let Some(stop) = self.stop_render.take() {
            stop();
        }
        // Every remaining timer handle dies with the page.
        {
            let mut page = self.page.borrow_mut();
            page.hero_first_timer = None;
            page.hero_second_timer = None;
            page.type_timer = None;
            page.copied_timer = None;
            page.stage_timers.borrow_mut().clear();
        }
        if let Some(unsub) = self.blink_unsub.take() {
            unsub();
        }
        match self.terminal.take() {
            Some(guard) => guard.release(),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Animation wiring
    // =========================================================================

    fn start_hero_decrypt(&mut self) {
        let first = self.spawn_decrypt_interval(self.config.scaled(HERO_FIRST_TICK_MS), true);
        let second = self.spawn_decrypt_interval(self.config.scaled(HERO_SECOND_TICK_MS), false);
        let mut page = self.page.borrow_mut();
        page.hero_first_timer = Some(first);
        page.hero_second_timer = Some(second);
    }

    fn spawn_decrypt_interval(&self, interval: Duration, first: bool) -> timers::TimerHandle {
        let page = Rc::clone(&self.page);
        let epoch = self.epoch.clone();
        timers::schedule_interval(interval, move || {
            let still_running = {
                let mut p = page.borrow_mut();
                let effect = if first { &mut p.hero_first } else { &mut p.hero_second };
                effect.tick()
            };
            bump(&epoch);
            if !still_running {
                let handle = {
                    let mut p = page.borrow_mut();
                    if first {
                        p.hero_first_timer.take()
                    } else {
                        p.hero_second_timer.take()
                    }
                };
                if let Some(handle) = handle {
                    handle.cancel();
                }
            }
        })
    }

    fn schedule_type_step(&self) {
        let delay = self.config.scaled(TERMINAL_TYPE_MS);
        let handle = spawn_type_step(Rc::clone(&self.page), self.epoch.clone(), delay);
        self.page.borrow_mut().type_timer = Some(handle);
    }

    /// Recompute everything that depends on scroll position: the about
    /// block's reveal progress and the contact terminal's visibility.
    fn refresh_scroll_state(&mut self) {
        let layout = self.layout.get();
        let offset = viewport::scroll_offset();
        let height = viewport::terminal_height();
        viewport::set_content_height(layout.total_height);

        let mut start_typing = false;
        {
            let mut page = self.page.borrow_mut();

            let about_top = layout.about_top as f32 - offset as f32;
            let progress = reveal_progress(about_top, height as f32);
            if (progress - page.about_progress).abs() > f32::EPSILON {
                page.about_progress = progress;
            }

            let fraction =
                visible_fraction(layout.contact_top, layout.contact_height, offset, height);
            if page.terminal.observe_visibility(fraction) {
                start_typing = true;
            }
        }
        bump(&self.epoch);

        if start_typing {
            self.schedule_type_step();
        }
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::Resize(width, height) => {
                viewport::set_terminal_size(width, height);
                self.refresh_scroll_state();
            }
            InputEvent::None => {}
        }
    }

    fn handle_key(&mut self, key: KeyPress) {
        if key.ctrl && key.key == Key::Char('c') {
            self.quit = true;
            return;
        }

        if self.page.borrow().gate.modal_open() {
            self.handle_modal_key(key);
            return;
        }

        match key.key {
            Key::Char('q') => self.quit = true,
            Key::Char('t') => {
                toggle_theme();
            }
            Key::Char('o') => {
                let mut page = self.page.borrow_mut();
                page.overlay_enabled = !page.overlay_enabled;
                drop(page);
                bump(&self.epoch);
            }
            Key::Char('e') => self.request_disclosure(DisclosureAction::SendEmail),
            Key::Char('c') => self.request_disclosure(DisclosureAction::CopyAddress),
            Key::Char('g') | Key::Char('l') => {
                if let Some(url) = social_target(key.key) {
                    launch_url(url);
                }
            }
            Key::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.page.borrow_mut().catalog.open_detail(index);
                bump(&self.epoch);
            }
            Key::Char('n') => self.cycle_detail(true),
            Key::Char('p') => self.cycle_detail(false),
            Key::Esc => {
                let had_detail = self.page.borrow().catalog.selected().is_some();
                if had_detail {
                    self.page.borrow_mut().catalog.close_detail();
                    bump(&self.epoch);
                }
            }
            Key::Up => self.scroll(-(viewport::LINE_SCROLL as i32)),
            Key::Down => self.scroll(viewport::LINE_SCROLL as i32),
            Key::PageUp => self.scroll(-(viewport::page_scroll_amount() as i32)),
            Key::PageDown => self.scroll(viewport::page_scroll_amount() as i32),
            Key::Home => {
                viewport::scroll_to_top();
                self.refresh_scroll_state();
            }
            Key::End => {
                viewport::scroll_to_bottom();
                self.refresh_scroll_state();
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyPress) {
        let now = Instant::now();
        {
            let mut page = self.page.borrow_mut();
            match key.key {
                Key::Char(c) => page.challenge_input.push(c),
                Key::Backspace => {
                    page.challenge_input.pop();
                }
                Key::Enter => {
                    let input = std::mem::take(&mut page.challenge_input);
                    page.gate.submit_challenge(&input, now);
                }
                Key::Esc => {
                    page.challenge_input.clear();
                    page.gate.close_modal(now);
                }
                _ => {}
            }
        }
        self.after_gate_change();
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        match event.kind {
            PointerKind::Move => pointer::set_pointer(event.x, event.y),
            PointerKind::ScrollUp => self.scroll(-(viewport::WHEEL_SCROLL as i32)),
            PointerKind::ScrollDown => self.scroll(viewport::WHEEL_SCROLL as i32),
            PointerKind::Down => {}
        }
    }

    fn scroll(&mut self, delta: i32) {
        if viewport::scroll_by(delta) {
            self.refresh_scroll_state();
        }
    }

    fn cycle_detail(&mut self, forward: bool) {
        let mut page = self.page.borrow_mut();
        if page.catalog.selected().is_some() {
            page.catalog.cycle_detail(forward);
            drop(page);
            bump(&self.epoch);
        }
    }

    fn request_disclosure(&mut self, action: DisclosureAction) {
        {
            let mut page = self.page.borrow_mut();
            page.challenge_input.clear();
            page.gate.request_disclosure(action, Instant::now());
        }
        self.after_gate_change();
    }

    /// After any gate transition: arm the copied-indicator timer if the
    /// clipboard write just happened, and repaint.
    fn after_gate_change(&mut self) {
        let needs_timer = {
            let page = self.page.borrow();
            page.gate.copied_indicator() && page.copied_timer.is_none()
        };
        if needs_timer {
            let page_for_timer = Rc::clone(&self.page);
            let epoch = self.epoch.clone();
            let handle = timers::schedule_once(
                Duration::from_millis(COPIED_INDICATOR_MS),
                move || {
                    let mut page = page_for_timer.borrow_mut();
                    page.gate.clear_copied_indicator();
                    page.copied_timer = None;
                    drop(page);
                    bump(&epoch);
                },
            );
            self.page.borrow_mut().copied_timer = Some(handle);
        }
        bump(&self.epoch);
    }
}

/// One typing step; reschedules itself until the typewriter finishes.
fn spawn_type_step(
    page: Rc<RefCell<Page>>,
    epoch: Signal<u64>,
    delay: Duration,
) -> timers::TimerHandle {
    let page_for_step = Rc::clone(&page);
    let epoch_for_step = epoch.clone();
    timers::schedule_once(delay, move || {
        let more = page_for_step.borrow_mut().terminal.step();
        bump(&epoch_for_step);
        if more {
            let next = spawn_type_step(Rc::clone(&page_for_step), epoch_for_step.clone(), delay);
            page_for_step.borrow_mut().type_timer = Some(next);
        } else {
            page_for_step.borrow_mut().type_timer = None;
        }
    })
}

/// Profile URL for a social-link key, if the key is one.
fn social_target(key: Key) -> Option<&'static str> {
    match key {
        Key::Char('g') => Some(GITHUB_URL),
        Key::Char('l') => Some(LINKEDIN_URL),
        _ => None,
    }
}

/// Fraction of a content range currently inside the scrolled window.
fn visible_fraction(top: u16, height: u16, offset: u16, viewport_height: u16) -> f32 {
    if height == 0 {
        return 0.0;
    }
    let view_start = offset as i32;
    let view_end = offset as i32 + viewport_height as i32;
    let start = top as i32;
    let end = start + height as i32;
    let overlap = (end.min(view_end) - start.max(view_start)).max(0);
    overlap as f32 / height as f32
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_fraction_fully_inside() {
        assert_eq!(visible_fraction(10, 10, 0, 24), 1.0);
    }

    #[test]
    fn test_visible_fraction_below_window() {
        assert_eq!(visible_fraction(100, 10, 0, 24), 0.0);
    }

    #[test]
    fn test_visible_fraction_partial() {
        // Rows 20..30 against a window showing rows 0..24: 4 of 10 visible.
        let fraction = visible_fraction(20, 10, 0, 24);
        assert!((fraction - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_visible_fraction_scrolled_past() {
        assert_eq!(visible_fraction(0, 10, 40, 24), 0.0);
    }

    #[test]
    fn test_config_speed_scales_intervals() {
        let config = AppConfig {
            speed: 2.0,
            ..Default::default()
        };
        assert_eq!(config.scaled(100), Duration::from_millis(50));
        // Zero or negative speed falls back to 1x.
        let broken = AppConfig {
            speed: 0.0,
            ..Default::default()
        };
        assert_eq!(broken.scaled(100), Duration::from_millis(100));
    }

    #[test]
    fn test_stage_delays_match_staging_order() {
        // The later lines intentionally land before the first.
        assert_eq!(STAGE_DELAYS_MS, [200, 100, 110, 120]);
    }

    #[test]
    fn test_social_keys_map_to_profile_urls() {
        // Every advertised [G]/[L] affordance has a live binding.
        assert_eq!(social_target(Key::Char('g')), Some(GITHUB_URL));
        assert_eq!(social_target(Key::Char('l')), Some(LINKEDIN_URL));
        assert_eq!(social_target(Key::Char('x')), None);
        assert_eq!(social_target(Key::Enter), None);
    }
}
