//! Shared styles for the picker UI.

use ratatui::style::{Color, Modifier, Style};

/// List selection indicator shown next to the cursor row
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

/// Check mark rendered on the selected site row
pub const SELECTED_MARK: &str = "✔";

pub fn title_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn highlight_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn selected_mark_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn warning_style() -> Style {
    Style::default().fg(Color::Yellow)
}
