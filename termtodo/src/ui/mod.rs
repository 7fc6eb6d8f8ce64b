//! Terminal UI rendering.

pub mod input_box;
pub mod progress;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;
use crate::store::TaskStore;

/// Main draw function for the entire UI.
pub fn draw<S: TaskStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress gauge
            Constraint::Min(3),    // Task list
            Constraint::Length(3), // New-task input
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    progress::render(frame, chunks[0], app);
    task_panel::render(frame, chunks[1], app);
    input_box::render(frame, chunks[2], app);
    status_bar::render(frame, chunks[3], app);
}
