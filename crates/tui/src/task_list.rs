//! Task list panel.
//!
//! Renders the filtered tasks as one styled line each, with the selected
//! line highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use tasklet_store::{Priority, Task, TaskId};

/// Shown when no task passes the filter and search.
pub const EMPTY_MESSAGE: &str = "Add a task to get started!";

/// Render the task list panel.
///
/// `editing` marks the task whose text is being edited, if any.
pub fn render_task_list(
    frame: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    selected_index: usize,
    editing: Option<TaskId>,
) {
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if tasks.is_empty() {
        let paragraph = Paragraph::new(EMPTY_MESSAGE)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    // Keep the selection on screen
    let inner_height = area.height.saturating_sub(2) as usize;
    let offset = if inner_height > 0 && selected_index >= inner_height {
        selected_index + 1 - inner_height
    } else {
        0
    };

    let items: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(i, task)| render_task_line(task, i == selected_index, editing == Some(task.id)))
        .collect();

    frame.render_widget(Paragraph::new(items).block(block), area);
}

/// Render a single task as a styled line.
fn render_task_line(task: &Task, is_selected: bool, is_editing: bool) -> Line<'static> {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let suffix = if is_editing { " (editing)" } else { "" };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray)
    } else if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(format!("{} {}{}", marker, task.text, suffix), text_style),
        Span::styled(
            format!("  {}", task.priority),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(
            format!("  {}", task.created_at),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Get the display color for a priority.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}
