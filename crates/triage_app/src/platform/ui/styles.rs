//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

/// Border of the panel that has keyboard focus.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border of panels without focus.
pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for key hints and placeholder text.
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for error messages.
pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for the in-flight indicator.
pub fn loading_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Style for the returned classification label.
pub fn classification_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

/// Style for the over-limit character counter.
pub fn over_limit_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}
