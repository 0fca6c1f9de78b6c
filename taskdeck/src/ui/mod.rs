//! Terminal UI rendering.
//!
//! Pure presentation: every panel renders from the [`App`] state (which
//! carries the latest store snapshot) and nothing here mutates anything.

pub mod input_bar;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Task list
            Constraint::Length(3), // Input line
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    task_list::render(frame, chunks[0], app);
    input_bar::render(frame, chunks[1], app);
    status_bar::render(frame, chunks[2], app);
}
