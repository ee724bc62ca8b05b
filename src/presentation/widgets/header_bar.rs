//! Title row with the app name, version, offline flag and theme glyph.

use crate::infrastructure::ThemeMode;
use crate::presentation::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const OFFLINE_BANNER: &str = " Offline Mode ";

trait ThemeModeExt {
    fn indicator(self) -> &'static str;
}

impl ThemeModeExt for ThemeMode {
    fn indicator(self) -> &'static str {
        match self {
            Self::Light => "☀",
            Self::Dark => "☾",
        }
    }
}

/// Styles of the header segments.
pub struct HeaderBarStyle {
    /// Row background.
    pub background: Style,
    /// App name badge.
    pub app_name: Style,
    /// Version badge.
    pub version: Style,
    /// Offline flag.
    pub offline: Style,
    /// Theme glyph.
    pub theme: Style,
}

impl HeaderBarStyle {
    /// Derives the badge colours from the theme accent.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        use crate::presentation::theme::adapter::ColorConverter;

        let version_bg = ColorConverter::shade(theme.accent, 0.5, 0.12);

        Self {
            background: theme.base_style,
            app_name: Style::default()
                .bg(theme.accent)
                .fg(ColorConverter::readable_text_on(theme.accent))
                .add_modifier(Modifier::BOLD),
            version: Style::default().bg(version_bg).fg(Color::White),
            offline: theme.offline_style,
            theme: theme.dimmed_style,
        }
    }
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            version: Style::default().fg(Color::DarkGray),
            offline: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            theme: Style::default().fg(Color::DarkGray),
        }
    }
}

/// One-line header widget.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    version: &'a str,
    online: bool,
    mode: ThemeMode,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    /// Online, light-mode header with default styles.
    #[must_use]
    pub fn new(app_name: &'a str, version: &'a str) -> Self {
        Self {
            app_name,
            version,
            online: true,
            mode: ThemeMode::default(),
            style: HeaderBarStyle::default(),
        }
    }

    /// Shows the offline flag when `online` is false.
    #[must_use]
    pub const fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// Picks the theme glyph.
    #[must_use]
    pub const fn mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the default styles.
    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn right_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        if !self.online {
            spans.push(Span::styled(OFFLINE_BANNER, self.style.offline));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("{} {} ", self.mode.indicator(), self.mode),
            self.style.theme,
        ));
        spans
    }
}

impl Widget for HeaderBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        buf.set_style(Rect::new(area.x, area.y, area.width, 1), self.style.background);

        let left_line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::raw(" "),
            Span::styled(format!(" v{} ", self.version), self.style.version),
        ]);
        let left_width = left_line.width() as u16;
        Paragraph::new(left_line).render(
            Rect::new(area.x, area.y, left_width.min(area.width), 1),
            buf,
        );

        let right_line = Line::from(self.right_spans());
        let right_width = right_line.width() as u16;

        if right_width < area.width.saturating_sub(left_width) {
            let right_x = area.right().saturating_sub(right_width);
            Paragraph::new(right_line).render(Rect::new(right_x, area.y, right_width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(header: HeaderBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_theme_indicator() {
        assert_eq!(ThemeMode::Light.indicator(), "☀");
        assert_eq!(ThemeMode::Dark.indicator(), "☾");
    }

    #[test]
    fn test_offline_banner_shown_only_when_offline() {
        let online = render(HeaderBar::new("photogrid", "0.1.0"), 60);
        let offline = render(HeaderBar::new("photogrid", "0.1.0").online(false), 60);

        assert!(online.starts_with(" PHOTOGRID "));
        assert!(!online.contains("Offline Mode"));
        assert!(offline.contains("Offline Mode"));
    }

    #[test]
    fn test_right_side_dropped_when_narrow() {
        let rendered = render(
            HeaderBar::new("photogrid", "0.1.0")
                .online(false)
                .mode(ThemeMode::Dark),
            24,
        );
        assert!(!rendered.contains("Offline"));
        assert!(rendered.starts_with(" PHOTOGRID "));
    }
}
