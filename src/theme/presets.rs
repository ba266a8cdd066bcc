//! Built-in theme presets.
//!
//! Two presets only: `dark` (near-black page, cyan accent) and `light`
//! (off-white page, orange accent). The grid/crosshair slots carry the
//! pointer-overlay colors, which do not simply follow the accent - the light
//! preset pairs a neutral grid with an orange-red crosshair.

use super::Theme;
use crate::types::Rgba;

/// Dark preset: zinc-950 page, cyan accent.
pub fn dark() -> Theme {
    Theme {
        name: "dark".to_string(),
        background: Rgba::rgb(9, 9, 11),
        surface: Rgba::rgb(24, 24, 27),
        text: Rgba::rgb(244, 244, 245),
        text_dim: Rgba::rgb(113, 113, 122),
        accent: Rgba::rgb(34, 211, 238),
        border: Rgba::rgb(39, 39, 42),
        success: Rgba::rgb(34, 197, 94),
        error: Rgba::rgb(239, 68, 68),
        // cyan at ~10% over the page background
        grid: Rgba::rgb(0, 255, 255).over(Rgba::rgb(9, 9, 11), 0.1),
        crosshair: Rgba::rgb(0, 255, 255),
    }
}

/// Light preset: zinc-50 page, orange accent.
pub fn light() -> Theme {
    Theme {
        name: "light".to_string(),
        background: Rgba::rgb(250, 250, 250),
        surface: Rgba::rgb(255, 255, 255),
        text: Rgba::rgb(24, 24, 27),
        text_dim: Rgba::rgb(161, 161, 170),
        accent: Rgba::rgb(234, 88, 12),
        border: Rgba::rgb(212, 212, 216),
        success: Rgba::rgb(22, 163, 74),
        error: Rgba::rgb(220, 38, 38),
        // neutral black at ~10% over the page background
        grid: Rgba::BLACK.over(Rgba::rgb(250, 250, 250), 0.1),
        crosshair: Rgba::rgb(255, 69, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_grid_is_faint() {
        let theme = dark();
        // Grid must sit close to the background, not near full cyan.
        assert!(theme.grid.g < 60);
        assert!(theme.grid.b < 60);
    }

    #[test]
    fn test_light_grid_is_neutral() {
        let theme = light();
        assert_eq!(theme.grid.r, theme.grid.g);
        assert_eq!(theme.grid.g, theme.grid.b);
    }
}
