//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, InputMode};
use crate::store::TaskStore;

/// Render the status bar at the bottom of the screen.
pub fn render<S: TaskStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let help_text = match app.mode {
        InputMode::Normal => {
            "i: new | Enter/Space: toggle | e: edit | d: delete | Tab: filter | r: reload | q: quit"
        }
        InputMode::Insert => "Enter: add | Esc: back",
        InputMode::Edit => "Enter: save | Esc: cancel",
    };

    let mut spans = vec![
        Span::styled("TermTodo v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::raw(app.status.clone()),
    ];
    if app.controller.in_flight() > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "syncing…",
            theme::normal().fg(theme::WARNING),
        ));
    }
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
