//! Theme system

use ratatui::style::Color;

/// RGB color used by the pixel surface (alpha is applied at blend time).
pub type Rgb = [u8; 3];

/// Globe palette, matching the product's violet/blue branding.
pub const GLOBE_VIOLET: Rgb = [139, 92, 246];
pub const GLOBE_BLUE: Rgb = [59, 130, 246];
pub const GLOBE_WHITE: Rgb = [255, 255, 255];

/// Complete color palette for TUI rendering
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    // Backgrounds
    pub bg_primary: Color,
    pub bg_card: Color,
    pub bg_highlight: Color,

    // Borders
    pub border_default: Color,
    pub border_focus: Color,
    pub border_muted: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Status
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,

    // Accents
    pub accent_violet: Color,
    pub accent_blue: Color,
    pub accent_cyan: Color,
    pub accent_green: Color,
    pub accent_yellow: Color,
    pub accent_pink: Color,
}

impl ThemeColors {
    /// Default theme
    pub const DEFAULT: Self = Self {
        // Backgrounds
        bg_primary: Color::Rgb(16, 16, 28),
        bg_card: Color::Rgb(28, 28, 46),
        bg_highlight: Color::Rgb(48, 46, 74),

        // Borders
        border_default: Color::Rgb(120, 115, 160),
        border_focus: Color::Rgb(170, 140, 250),
        border_muted: Color::Rgb(80, 78, 108),

        // Text
        text_primary: Color::Rgb(232, 230, 248),
        text_secondary: Color::Rgb(185, 182, 212),
        text_muted: Color::Rgb(138, 135, 165),

        // Status
        success: Color::Rgb(110, 220, 130),
        error: Color::Rgb(250, 110, 125),
        warning: Color::Rgb(240, 190, 95),
        info: Color::Rgb(105, 195, 250),

        // Accents
        accent_violet: Color::Rgb(170, 130, 250),
        accent_blue: Color::Rgb(110, 160, 250),
        accent_cyan: Color::Rgb(100, 215, 235),
        accent_green: Color::Rgb(110, 210, 120),
        accent_yellow: Color::Rgb(235, 195, 100),
        accent_pink: Color::Rgb(240, 145, 185),
    };

    /// Feature-card accent rotation by index
    #[inline]
    pub fn feature_color(&self, index: usize) -> Color {
        const COLORS: [Color; 6] = [
            Color::Rgb(170, 130, 250),
            Color::Rgb(110, 210, 120),
            Color::Rgb(105, 195, 250),
            Color::Rgb(240, 190, 95),
            Color::Rgb(240, 145, 185),
            Color::Rgb(100, 215, 235),
        ];
        COLORS[index % 6]
    }
}

/// Theme container providing access to color palette
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    #[inline]
    pub const fn colors(&self) -> ThemeColors {
        ThemeColors::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_background() {
        let colors = ThemeColors::DEFAULT;
        assert_eq!(colors.bg_primary, Color::Rgb(16, 16, 28));
    }

    #[test]
    fn test_feature_color_rotation() {
        let colors = ThemeColors::DEFAULT;
        assert_eq!(colors.feature_color(0), colors.feature_color(6));
    }
}
