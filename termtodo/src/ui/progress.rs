//! Completion progress gauge.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Gauge},
};

use super::theme;
use crate::app::App;
use crate::store::TaskStore;

/// Render the completion gauge above the task list.
pub fn render<S: TaskStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let progress = app.controller.progress();
    // Display rounds to whole percent; the underlying value stays exact.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = progress.round() as u16;

    let gauge = Gauge::default()
        .block(Block::default().title(" Progress ").borders(Borders::ALL))
        .gauge_style(theme::normal().fg(theme::SUCCESS))
        .percent(percent.min(100))
        .label(format!("{percent}% completed"));

    frame.render_widget(gauge, area);
}
