//! Application state and event handling.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::TaskStore;
use crate::tasks::{StoreOutcome, TaskListController};

/// Which input mode the app is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating the task list (default).
    Normal,
    /// Typing a new task title into the input box.
    Insert,
    /// Editing the title of an existing task in place.
    Edit,
}

/// Main application state.
pub struct App<S> {
    /// Task list state and store synchronization.
    pub controller: TaskListController<S>,
    /// Current input mode.
    pub mode: InputMode,
    /// New-task input buffer.
    pub input: String,
    /// Cursor position in the input buffer (character index).
    pub cursor_position: usize,
    /// Selected row in the filtered task list.
    pub selected: usize,
    /// Last user-facing status message.
    pub status: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S: TaskStore> App<S> {
    /// Creates the app and requests the initial task snapshot.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        let mut controller = TaskListController::new(store);
        controller.load();
        Self {
            controller,
            mode: InputMode::Normal,
            input: String::new(),
            cursor_position: 0,
            selected: 0,
            status: "loading tasks".to_string(),
            should_quit: false,
        }
    }

    /// Id of the task under the selection cursor, if any.
    #[must_use]
    pub fn selected_task_id(&self) -> Option<String> {
        self.controller
            .filtered_tasks()
            .get(self.selected)
            .map(|t| t.id.clone())
    }

    /// Applies every store completion that has arrived since the last call.
    pub fn drain_store_events(&mut self) {
        for outcome in self.controller.try_drain() {
            self.apply_outcome(&outcome);
        }
        self.clamp_selection();
    }

    fn apply_outcome(&mut self, outcome: &StoreOutcome) {
        match outcome {
            StoreOutcome::Loaded { count } => {
                self.status = format!("{count} tasks loaded");
            }
            StoreOutcome::Added { title } => {
                // The input survives until the server confirms, so a failed
                // submit can be retried as-is.
                self.input.clear();
                self.cursor_position = 0;
                self.status = format!("added '{title}'");
            }
            StoreOutcome::EditSaved => {
                self.mode = InputMode::Normal;
                self.status = "saved".to_string();
            }
            StoreOutcome::ToggleConfirmed => {
                self.status = "toggled".to_string();
            }
            StoreOutcome::Removed { .. } => {
                self.status = "deleted".to_string();
            }
            StoreOutcome::LoadFailed(e)
            | StoreOutcome::AddFailed(e)
            | StoreOutcome::ToggleFailed(e)
            | StoreOutcome::EditFailed(e)
            | StoreOutcome::RemoveFailed(e) => {
                self.status = format!("error: {e}");
            }
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }
        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
            InputMode::Edit => self.handle_edit_key(key),
        }
    }

    /// Key handling while navigating the list.
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('i' | 'a') => self.mode = InputMode::Insert,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d' | 'x') => self.delete_selected(),
            KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Tab | KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('r') => {
                self.controller.load();
                self.status = "reloading".to_string();
            }
            _ => {}
        }
    }

    /// Key handling while typing a new task title.
    fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.input.len(),
            _ => {}
        }
    }

    /// Key handling while editing an existing task title in place.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.controller.cancel_edit();
                self.mode = InputMode::Normal;
            }
            // Edit mode is left only once the server confirms the save.
            KeyCode::Enter => self.controller.save_edit(),
            KeyCode::Char(c) => {
                if let Some(buffer) = self.controller.edit_buffer_mut() {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.controller.edit_buffer_mut() {
                    buffer.pop();
                }
            }
            _ => {}
        }
    }

    /// Submit the input buffer as a new task.
    fn submit_input(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }
        self.controller.add(&self.input);
        self.status = "adding".to_string();
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.controller.toggle(&id);
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.controller.delete(&id);
            self.status = "deleting".to_string();
        }
    }

    fn edit_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.controller.tasks().iter().find(|t| t.id == id) {
            let title = task.title.clone();
            self.controller.start_edit(&id, &title);
            self.mode = InputMode::Edit;
        }
    }

    fn cycle_filter(&mut self) {
        let next = self.controller.filter().next();
        self.controller.set_filter(next);
        self.status = format!("filter: {next}");
        self.clamp_selection();
    }

    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn select_next(&mut self) {
        let len = self.controller.filtered_tasks().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the filtered list after it shrinks.
    fn clamp_selection(&mut self) {
        let len = self.controller.filtered_tasks().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.input[..self.cursor_position]
                .chars()
                .next_back()
                .map_or(0, char::len_utf8);
            self.cursor_position -= prev;
            self.input.remove(self.cursor_position);
        }
    }

    /// Move cursor left.
    fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.input[..self.cursor_position]
                .chars()
                .next_back()
                .map_or(0, char::len_utf8);
            self.cursor_position -= prev;
        }
    }

    /// Move cursor right.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            let next = self.input[self.cursor_position..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
            self.cursor_position += next;
        }
    }
}
