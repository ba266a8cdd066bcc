//! Theme system for termfolio.
//!
//! Two presets (dark with a cyan accent, light with an orange accent) over a
//! small set of semantic color slots. The active theme is process-wide
//! reactive state: each slot is its own `Signal`, so a derived that only
//! reads `accent` is not re-run when `border` changes.
//!
//! Page-session scoped - every launch starts on the configured preset, and
//! `toggle_theme()` flips between the two at runtime.

use spark_signals::{batch, signal, Signal};

use crate::types::Rgba;

pub mod presets;

pub use presets::{dark, light};

// =============================================================================
// Theme - semantic color slots
// =============================================================================

/// Theme definition with all semantic colors.
///
/// `grid` and `crosshair` exist as explicit slots because the pointer overlay
/// does not derive them from the accent: the light preset uses a neutral grid
/// with an orange-red crosshair.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name ("dark" or "light" for the built-ins).
    pub name: String,

    /// Page background.
    pub background: Rgba,
    /// Card/panel background.
    pub surface: Rgba,
    /// Primary text.
    pub text: Rgba,
    /// Muted/secondary text.
    pub text_dim: Rgba,
    /// Accent for highlights and section markers.
    pub accent: Rgba,
    /// Border color.
    pub border: Rgba,
    /// Positive feedback (copied indicator, challenge passed).
    pub success: Rgba,
    /// Error feedback (challenge failed/expired).
    pub error: Rgba,
    /// Low-opacity overlay grid lines.
    pub grid: Rgba,
    /// High-opacity crosshair through the pointer.
    pub crosshair: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        presets::dark()
    }
}

// =============================================================================
// Reactive theme state
// =============================================================================

/// Per-slot signals for the active theme.
struct ReactiveTheme {
    name: Signal<String>,
    background: Signal<Rgba>,
    surface: Signal<Rgba>,
    text: Signal<Rgba>,
    text_dim: Signal<Rgba>,
    accent: Signal<Rgba>,
    border: Signal<Rgba>,
    success: Signal<Rgba>,
    error: Signal<Rgba>,
    grid: Signal<Rgba>,
    crosshair: Signal<Rgba>,
}

impl ReactiveTheme {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            name: signal(theme.name.clone()),
            background: signal(theme.background),
            surface: signal(theme.surface),
            text: signal(theme.text),
            text_dim: signal(theme.text_dim),
            accent: signal(theme.accent),
            border: signal(theme.border),
            success: signal(theme.success),
            error: signal(theme.error),
            grid: signal(theme.grid),
            crosshair: signal(theme.crosshair),
        }
    }

    /// Batched so subscribed effects flush once, after every slot has
    /// been written, not once per changed slot.
    fn write(&self, theme: &Theme) {
        batch(|| {
            self.name.set(theme.name.clone());
            self.background.set(theme.background);
            self.surface.set(theme.surface);
            self.text.set(theme.text);
            self.text_dim.set(theme.text_dim);
            self.accent.set(theme.accent);
            self.border.set(theme.border);
            self.success.set(theme.success);
            self.error.set(theme.error);
            self.grid.set(theme.grid);
            self.crosshair.set(theme.crosshair);
        });
    }
}

// Signals directly in the thread-local, no RefCell: `Signal::set` flushes
// subscribed effects synchronously, and those effects read back through
// `with_reactive`, so no borrow may be held across a write.
thread_local! {
    static REACTIVE_THEME: ReactiveTheme = ReactiveTheme::from_theme(&Theme::default());
}

fn with_reactive<R>(f: impl FnOnce(&ReactiveTheme) -> R) -> R {
    REACTIVE_THEME.with(f)
}

/// Replace the active theme. Notifies only the slots that actually changed.
pub fn set_theme(theme: &Theme) {
    with_reactive(|rt| rt.write(theme));
}

/// Read the full active theme as a plain value.
///
/// Reads every slot signal, so deriveds calling this re-run on any change.
/// Prefer [`t`] for fine-grained access.
pub fn active_theme() -> Theme {
    with_reactive(|rt| Theme {
        name: rt.name.get(),
        background: rt.background.get(),
        surface: rt.surface.get(),
        text: rt.text.get(),
        text_dim: rt.text_dim.get(),
        accent: rt.accent.get(),
        border: rt.border.get(),
        success: rt.success.get(),
        error: rt.error.get(),
        grid: rt.grid.get(),
        crosshair: rt.crosshair.get(),
    })
}

/// Flip between the dark and light presets.
pub fn toggle_theme() {
    let current = with_reactive(|rt| rt.name.get());
    if current == "dark" {
        set_theme(&presets::light());
    } else {
        set_theme(&presets::dark());
    }
}

/// Reset theme state back to the default preset (for testing).
pub fn reset_theme_state() {
    set_theme(&Theme::default());
}

// =============================================================================
// Accessor - the t.* pattern
// =============================================================================

/// Accessor for reactive theme colors.
///
/// Each method reads exactly one slot signal, so effects reading `accent()`
/// do not re-run when an unrelated slot changes.
#[derive(Clone)]
pub struct ThemeAccessor {
    background: Signal<Rgba>,
    surface: Signal<Rgba>,
    text: Signal<Rgba>,
    text_dim: Signal<Rgba>,
    accent: Signal<Rgba>,
    border: Signal<Rgba>,
    success: Signal<Rgba>,
    error: Signal<Rgba>,
    grid: Signal<Rgba>,
    crosshair: Signal<Rgba>,
}

impl ThemeAccessor {
    #[inline]
    pub fn background(&self) -> Rgba {
        self.background.get()
    }

    #[inline]
    pub fn surface(&self) -> Rgba {
        self.surface.get()
    }

    #[inline]
    pub fn text(&self) -> Rgba {
        self.text.get()
    }

    #[inline]
    pub fn text_dim(&self) -> Rgba {
        self.text_dim.get()
    }

    #[inline]
    pub fn accent(&self) -> Rgba {
        self.accent.get()
    }

    #[inline]
    pub fn border(&self) -> Rgba {
        self.border.get()
    }

    #[inline]
    pub fn success(&self) -> Rgba {
        self.success.get()
    }

    #[inline]
    pub fn error(&self) -> Rgba {
        self.error.get()
    }

    #[inline]
    pub fn grid(&self) -> Rgba {
        self.grid.get()
    }

    #[inline]
    pub fn crosshair(&self) -> Rgba {
        self.crosshair.get()
    }
}

/// Get the theme accessor for the active theme.
pub fn t() -> ThemeAccessor {
    with_reactive(|rt| ThemeAccessor {
        background: rt.background.clone(),
        surface: rt.surface.clone(),
        text: rt.text.clone(),
        text_dim: rt.text_dim.clone(),
        accent: rt.accent.clone(),
        border: rt.border.clone(),
        success: rt.success.clone(),
        error: rt.error.clone(),
        grid: rt.grid.clone(),
        crosshair: rt.crosshair.clone(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_theme_state();
    }

    #[test]
    fn test_default_theme_is_dark() {
        setup();
        assert_eq!(active_theme().name, "dark");
    }

    #[test]
    fn test_set_theme() {
        setup();
        set_theme(&presets::light());
        let theme = active_theme();
        assert_eq!(theme.name, "light");
        assert_eq!(theme.accent, presets::light().accent);
    }

    #[test]
    fn test_toggle_theme_round_trip() {
        setup();
        assert_eq!(active_theme().name, "dark");
        toggle_theme();
        assert_eq!(active_theme().name, "light");
        toggle_theme();
        assert_eq!(active_theme().name, "dark");
    }

    #[test]
    fn test_accessor_tracks_active_theme() {
        setup();
        let theme = t();
        assert_eq!(theme.accent(), presets::dark().accent);

        set_theme(&presets::light());
        assert_eq!(theme.accent(), presets::light().accent);
    }

    #[test]
    fn test_toggle_under_subscribed_effect() {
        setup();

        // Mirrors the frame render effect: reads the whole theme, so it is
        // subscribed to every slot. A toggle must not re-enter the theme
        // state mid-write, and the batched write flushes the effect once.
        use std::cell::{Cell, RefCell};
        use std::rc::Rc;

        let runs = Rc::new(Cell::new(0u32));
        let names = Rc::new(RefCell::new(Vec::new()));
        let runs_in_effect = runs.clone();
        let names_in_effect = names.clone();
        let stop = spark_signals::effect(move || {
            let theme = active_theme();
            runs_in_effect.set(runs_in_effect.get() + 1);
            names_in_effect.borrow_mut().push(theme.name);
        });
        assert_eq!(runs.get(), 1);

        toggle_theme();
        assert_eq!(runs.get(), 2);

        toggle_theme();
        assert_eq!(runs.get(), 3);
        assert_eq!(*names.borrow(), vec!["dark", "light", "dark"]);

        stop();
    }

    #[test]
    fn test_presets_differ() {
        let d = presets::dark();
        let l = presets::light();
        assert_ne!(d.background, l.background);
        assert_ne!(d.accent, l.accent);
        assert_ne!(d.crosshair, l.crosshair);
    }
}
