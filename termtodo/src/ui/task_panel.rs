//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::theme;
use crate::app::{App, InputMode};
use crate::store::TaskStore;

/// Render the filtered task list with checkboxes and inline edits.
pub fn render<S: TaskStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let editing = app.controller.editing().cloned();
    let filter = app.controller.filter();

    let items: Vec<ListItem> = app
        .controller
        .filtered_tasks()
        .iter()
        .map(|task| {
            let checkbox = if task.completed { "[✓]" } else { "[ ]" };

            // A task being edited shows its pending buffer, not its title.
            let line = match &editing {
                Some(edit) if edit.id == task.id && app.mode == InputMode::Edit => {
                    Line::from(vec![
                        Span::styled(checkbox, theme::normal()),
                        Span::raw(" "),
                        Span::styled(edit.buffer.clone(), theme::highlighted()),
                        Span::styled("▏", theme::input_cursor()),
                    ])
                }
                _ => {
                    let style = if task.completed {
                        theme::completed()
                    } else {
                        theme::normal()
                    };
                    Line::from(vec![
                        Span::styled(checkbox, theme::normal()),
                        Span::raw(" "),
                        Span::styled(task.title.clone(), style),
                    ])
                }
            };
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            format!(" Tasks ({filter}) "),
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if app.mode == InputMode::Normal {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected());

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}
