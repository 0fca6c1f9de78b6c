//! New-task input line rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the input line with a visible cursor.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == PanelFocus::Input;
    let border_style = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };

    let title = if app.snapshot.is_saving {
        Span::styled("New task (saving\u{2026})", theme::in_flight())
    } else {
        Span::styled("New task", theme::bold())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let line = if focused {
        line_with_cursor(&app.input, app.cursor_position)
    } else {
        Line::from(Span::styled(app.input.clone(), theme::normal()))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Builds the input line with the character under the cursor inverted.
fn line_with_cursor(input: &str, cursor: usize) -> Line<'static> {
    let before: String = input.chars().take(cursor).collect();
    let at: String = input.chars().skip(cursor).take(1).collect();
    let after: String = input.chars().skip(cursor + 1).collect();

    let cursor_span = if at.is_empty() {
        Span::styled(" ".to_string(), theme::input_cursor())
    } else {
        Span::styled(at, theme::input_cursor())
    };

    Line::from(vec![
        Span::styled(before, theme::normal()),
        cursor_span,
        Span::styled(after, theme::normal()),
    ])
}
