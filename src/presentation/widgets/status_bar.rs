//! Status bar widget and timed toasts.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Short-lived message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    message: String,
    level: StatusLevel,
    expires_at: Instant,
}

impl Toast {
    /// Creates a toast visible for `duration` from `now`.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        level: StatusLevel,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: now + duration,
        }
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the level.
    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    /// True once `now` is past the expiry.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    right: String,
    level: StatusLevel,
    hint_style: Style,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
            hint_style: Style::default().fg(Color::DarkGray),
        }
    }

    /// Shows the toast on the left when there is one.
    #[must_use]
    pub fn toast(mut self, toast: Option<&Toast>) -> Self {
        if let Some(toast) = toast {
            self.left = toast.message().to_string();
            self.level = toast.level();
        }
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets the style of the right-hand hints.
    #[must_use]
    pub const fn hint_style(mut self, style: Style) -> Self {
        self.hint_style = style;
        self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        let width = usize::from(area.width);
        let left_len = self.left.width();
        let right_len = self.right.width();

        let mut spans = vec![Span::styled(self.left.as_str(), style)];

        // Hints give way to the message on narrow terminals.
        if left_len + right_len < width {
            spans.push(Span::raw(" ".repeat(width - left_len - right_len)));
            spans.push(Span::styled(self.right.as_str(), self.hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
