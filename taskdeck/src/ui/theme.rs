//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color (completed tasks, refresh info).
pub const SUCCESS: Color = Color::Green;

/// Warning color (in-flight markers).
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task list.
pub const TASKS_TITLE: Color = Color::Green;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (completed tasks, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Success indicator style (completed checkboxes).
#[must_use]
pub fn success() -> Style {
    Style::default().fg(SUCCESS)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for error text.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Style for in-flight markers (spinner, saving indicator).
#[must_use]
pub fn in_flight() -> Style {
    Style::default().fg(WARNING)
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
