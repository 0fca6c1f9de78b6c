//! Task list panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the task list, or the loading/empty placeholder when there is
/// nothing to show yet.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == PanelFocus::List {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(Span::styled("Tasks", theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    if app.snapshot.tasks.is_empty() {
        let text = if app.snapshot.is_loading {
            Span::styled("Loading tasks\u{2026}", theme::in_flight())
        } else if app.snapshot.error.is_some() {
            Span::styled("Could not load tasks \u{2014} press r to retry", theme::error())
        } else {
            Span::styled("No tasks yet \u{2014} type a title and press Enter", theme::dimmed())
        };
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .snapshot
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let checkbox = if task.completed { "[\u{2713}]" } else { "[ ]" };
            let is_selected = app.focus == PanelFocus::List && i == app.selected;
            let style = if is_selected {
                theme::selected()
            } else if task.completed {
                theme::dimmed()
            } else {
                theme::normal()
            };
            let checkbox_style = if !is_selected && task.completed {
                theme::success()
            } else {
                style
            };

            let mut spans = vec![
                Span::styled(checkbox, checkbox_style),
                Span::raw(" "),
                Span::styled(task.title.clone(), style),
            ];
            if app.snapshot.updating_id == Some(task.id) {
                spans.push(Span::raw(" "));
                spans.push(Span::styled("\u{22ef}", theme::in_flight()));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
