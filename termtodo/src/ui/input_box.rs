//! New-task input box rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, InputMode};
use crate::store::TaskStore;

/// Render the new-task input box with a cursor in insert mode.
pub fn render<S: TaskStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let focused = app.mode == InputMode::Insert;

    let mut spans = vec![Span::styled(app.input.clone(), theme::normal())];
    if focused {
        spans.push(Span::styled("▏", theme::input_cursor()));
    }

    let block = Block::default()
        .title(Span::styled(
            " New task ",
            theme::panel_title(theme::INPUT_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
