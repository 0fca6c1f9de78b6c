//! Application state and event handling.
//!
//! [`App`] holds everything the view layer renders: the latest store
//! snapshot, the input line, focus, and list selection. Key events are
//! translated into [`StoreCommand`]s; store and worker feedback arrives
//! as [`UiEvent`]s. The app never touches the network itself.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::net::{StoreCommand, UiEvent};
use crate::store::StoreSnapshot;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// New-task input line is focused (default).
    Input,
    /// Task list is focused.
    List,
}

/// Main application state.
pub struct App {
    /// Current text input for a new task title.
    pub input: String,
    /// Cursor position in the input (character index).
    pub cursor_position: usize,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Latest store snapshot (tasks plus status flags).
    pub snapshot: StoreSnapshot,
    /// Selected task index in the list.
    pub selected: usize,
    /// When the collection was last successfully refreshed (formatted).
    pub refreshed_at: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// chrono format string for the refresh indicator.
    timestamp_format: String,
}

impl App {
    /// Creates an app with empty state; the first snapshot arrives from
    /// the store worker's initial fetch.
    #[must_use]
    pub fn new(timestamp_format: &str) -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            focus: PanelFocus::Input,
            snapshot: StoreSnapshot::default(),
            selected: 0,
            refreshed_at: None,
            should_quit: false,
            timestamp_format: timestamp_format.to_string(),
        }
    }

    /// Applies a worker event to the app state.
    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::State(snapshot) => {
                let fetch_settled = self.snapshot.is_loading && !snapshot.is_loading;
                if fetch_settled && snapshot.error.is_none() {
                    self.refreshed_at =
                        Some(chrono::Local::now().format(&self.timestamp_format).to_string());
                }
                self.snapshot = snapshot;
                self.clamp_selection();
            }
            UiEvent::AddRejected { title } => {
                // Give the user their input back so it can be edited.
                self.cursor_position = title.chars().count();
                self.input = title;
            }
        }
    }

    /// Handles a key event, returning a command when the action requires
    /// a store dispatch.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when the input line is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Enter => Some(self.submit_input()),
            KeyCode::Char(c) => {
                self.enter_char(c);
                None
            }
            KeyCode::Backspace => {
                self.delete_char();
                None
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_position < self.input.chars().count() {
                    self.cursor_position += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.chars().count();
                None
            }
            _ => None,
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.snapshot.tasks.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .snapshot
                .tasks
                .get(self.selected)
                .map(|task| StoreCommand::Toggle { id: task.id }),
            KeyCode::Char('r') => Some(StoreCommand::FetchAll),
            _ => None,
        }
    }

    /// Submits the input line as an `Add` intent.
    ///
    /// The input is cleared immediately; when the store rejects the title
    /// the worker answers with [`UiEvent::AddRejected`] and the input is
    /// restored. Validation itself (trimming, empty check) belongs to the
    /// store, not the view.
    fn submit_input(&mut self) -> StoreCommand {
        let title = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        StoreCommand::Add { title }
    }

    /// Toggle focus between the input line and the task list.
    const fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::List,
            PanelFocus::List => PanelFocus::Input,
        };
    }

    /// Keeps the selection within the current collection bounds.
    fn clamp_selection(&mut self) {
        let len = self.snapshot.tasks.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        let idx = byte_index(&self.input, self.cursor_position);
        self.input.insert(idx, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let idx = byte_index(&self.input, self.cursor_position - 1);
            self.input.remove(idx);
            self.cursor_position -= 1;
        }
    }
}

/// Byte offset of the given character index in `s`.
fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(idx, _)| idx)
}
