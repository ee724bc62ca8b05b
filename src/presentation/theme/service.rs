//! Palette derived from the accent colour and the light/dark mode.

use super::adapter::ColorConverter;
use crate::infrastructure::ThemeMode;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Neutral swatch for photos whose average colour is missing or malformed.
const FALLBACK_SWATCH: Color = Color::Gray;

/// Styles every widget draws with.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Light or dark.
    pub mode: ThemeMode,
    /// Accent behind the app name badge, also tinting the selection.
    pub accent: Color,
    /// Screen background and primary text.
    pub base_style: Style,
    /// Unselected card frame.
    pub card_style: Style,
    /// Selected card frame.
    pub selection_style: Style,
    /// Secondary text such as URLs and hints.
    pub dimmed_style: Style,
    /// Error banners and failed image markers.
    pub error_style: Style,
    /// Offline indicator.
    pub offline_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan", ThemeMode::default())
    }
}

impl Theme {
    /// Parses `accent_color_str` (a name or `#RRGGBB`), falling back to cyan.
    #[must_use]
    pub fn new(accent_color_str: &str, mode: ThemeMode) -> Self {
        Self::from_color(parse_color(accent_color_str), mode)
    }

    /// Builds the palette for `mode` around `accent`.
    #[must_use]
    pub fn from_color(accent: Color, mode: ThemeMode) -> Self {
        let (background, foreground, dimmed, selection_lightness) = if mode.is_dark() {
            (Color::Rgb(0x12, 0x12, 0x12), Color::Rgb(0xE6, 0xE6, 0xE6), Color::DarkGray, 0.22)
        } else {
            (Color::Rgb(0xFA, 0xFA, 0xFA), Color::Rgb(0x1C, 0x1C, 0x1C), Color::Gray, 0.82)
        };

        let selection_bg = ColorConverter::shade(accent, 0.4, selection_lightness);

        Self {
            mode,
            accent,
            base_style: Style::default().bg(background).fg(foreground),
            card_style: Style::default().fg(dimmed),
            selection_style: Style::default()
                .bg(selection_bg)
                .fg(ColorConverter::readable_text_on(selection_bg))
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(dimmed),
            error_style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            offline_style: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Same accent, opposite mode.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self::from_color(self.accent, self.mode.toggled())
    }

    /// Swatch style for a photo's `#RRGGBB` average colour.
    #[must_use]
    pub fn swatch_style(avg_color: &str) -> Style {
        let swatch = parse_hex_color(avg_color)
            .map_or(FALLBACK_SWATCH, |(r, g, b)| Color::Rgb(r, g, b));
        Style::default()
            .bg(swatch)
            .fg(ColorConverter::readable_text_on(swatch))
    }
}

fn parse_color(s: &str) -> Color {
    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    if let Some((r, g, b)) = parse_hex_color(s) {
        return Color::Rgb(r, g, b);
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        _ => Color::Cyan,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let doubled = |i: usize| channel(hex[i..=i].repeat(2).as_str());
            Some((doubled(0)?, doubled(1)?, doubled(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Red", Color::Red ; "named")]
    #[test_case("blue", Color::Blue ; "lowercase named")]
    #[test_case("#FF0000", Color::Rgb(255, 0, 0) ; "six digit hex")]
    #[test_case("#0f0", Color::Rgb(0, 255, 0) ; "three digit hex")]
    #[test_case("Orange", Color::Indexed(208) ; "orange alias")]
    #[test_case("Invalid", Color::Cyan ; "fallback")]
    fn test_parse_color(input: &str, expected: Color) {
        assert_eq!(parse_color(input), expected);
    }

    #[test_case("#978E82", Some((0x97, 0x8E, 0x82)) ; "pexels average colour")]
    #[test_case("978E82", None ; "missing hash")]
    #[test_case("#97", None ; "too short")]
    #[test_case("#GG0000", None ; "not hex")]
    #[test_case("", None ; "empty")]
    fn test_parse_hex_color(input: &str, expected: Option<(u8, u8, u8)>) {
        assert_eq!(parse_hex_color(input), expected);
    }

    #[test]
    fn test_swatch_style_uses_avg_color() {
        let style = Theme::swatch_style("#FAF7F1");
        assert_eq!(style.bg, Some(Color::Rgb(0xFA, 0xF7, 0xF1)));
        assert_eq!(style.fg, Some(Color::Black));

        let fallback = Theme::swatch_style("not a colour");
        assert_eq!(fallback.bg, Some(FALLBACK_SWATCH));
    }

    #[test]
    fn test_modes_differ_and_toggle() {
        let light = Theme::new("Cyan", ThemeMode::Light);
        let dark = light.toggled();

        assert_eq!(dark.mode, ThemeMode::Dark);
        assert_eq!(dark.accent, light.accent);
        assert_ne!(light.base_style.bg, dark.base_style.bg);
        assert_eq!(dark.toggled().mode, ThemeMode::Light);
    }
}
