//! Application theming.
//!
//! A small semantic palette derived from the Catppuccin flavors. Widgets ask
//! for roles (`accent`, `low`/`medium`/`high`, ...) rather than raw palette
//! entries, so a non-Catppuccin theme could be added by filling the struct
//! directly.

use catppuccin::PALETTE;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::model::Competition;

const fn to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: Color,
    pub mantle: Color,
    pub surface: Color,
    pub surface_bright: Color,
    pub muted: Color,
    pub text: Color,
    pub subtext: Color,
    /// Titles and emphasis.
    pub accent: Color,
    /// Borders of focused elements, spinner.
    pub highlight: Color,
    /// Key hints in the status bar and help overlay.
    pub key_hint: Color,
    pub info: Color,
    pub low: Color,
    pub medium: Color,
    pub high: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: to_color(&c.base),
            mantle: to_color(&c.mantle),
            surface: to_color(&c.surface0),
            surface_bright: to_color(&c.surface2),
            muted: to_color(&c.overlay0),
            text: to_color(&c.text),
            subtext: to_color(&c.subtext0),
            accent: to_color(&c.mauve),
            highlight: to_color(&c.lavender),
            key_hint: to_color(&c.peach),
            info: to_color(&c.blue),
            low: to_color(&c.green),
            medium: to_color(&c.yellow),
            high: to_color(&c.red),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub const fn mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub const fn macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub const fn frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub const fn latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Style for a competition tier badge.
    #[must_use]
    pub fn competition_style(&self, competition: Competition) -> Style {
        let color = match competition {
            Competition::Low => self.low,
            Competition::Medium => self.medium,
            Competition::High => self.high,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Display metadata for a selectable theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeInfo {
    pub name: &'static str,
}

#[must_use]
pub fn available_themes() -> Vec<ThemeInfo> {
    THEMES.iter().map(|(name, _)| ThemeInfo { name }).collect()
}

/// Look up a theme by its config/display name. Unknown names fall back to
/// Catppuccin Mocha.
#[must_use]
pub fn theme_from_name(name: &str) -> Theme {
    THEMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map_or_else(Theme::mocha, |(_, theme)| *theme)
}

static THEMES: &[(&str, Theme)] = &[
    ("Catppuccin Mocha", Theme::mocha()),
    ("Catppuccin Macchiato", Theme::macchiato()),
    ("Catppuccin Frappé", Theme::frappe()),
    ("Catppuccin Latte", Theme::latte()),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup_by_name() {
        let latte = theme_from_name("catppuccin latte");
        assert_eq!(latte.base, Theme::latte().base);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_mocha() {
        let theme = theme_from_name("solarized");
        assert_eq!(theme.base, Theme::mocha().base);
    }

    #[test]
    fn test_listed_themes_are_distinct_flavors() {
        assert_eq!(available_themes().len(), 4);
        let mocha = theme_from_name("Catppuccin Mocha");
        let latte = theme_from_name("Catppuccin Latte");
        assert_ne!(mocha.base, latte.base);
    }
}
