//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
///
/// Errors take priority over everything else; otherwise the bar shows the
/// collection size, the last refresh time, and focus-specific key hints.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Input => "Enter: add | Tab: task list | Esc: quit",
        PanelFocus::List => {
            "Enter/Space: toggle | \u{2191}\u{2193}/jk: navigate | r: refresh | Tab: input | Esc: quit"
        }
    };

    let state_span = if let Some(ref message) = app.snapshot.error {
        Span::styled(
            format!("Error: {message} (r to retry)"),
            theme::error(),
        )
    } else if app.snapshot.is_loading {
        Span::styled("Loading\u{2026}", theme::in_flight())
    } else {
        let count = app.snapshot.tasks.len();
        let refreshed = app
            .refreshed_at
            .as_deref()
            .map_or_else(String::new, |t| format!(" | refreshed {t}"));
        Span::raw(format!("{count} tasks{refreshed}"))
    };

    let status_line = Line::from(vec![
        Span::styled("Taskdeck", theme::bold()),
        Span::raw(" | "),
        state_span,
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
