//! UI rendering for the TUI.
//!
//! Provides layout and widget rendering using ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use tasklet_store::{FilterMode, KeyValueStorage};

use crate::app::{App, InputMode};
use crate::task_list::{priority_color, render_task_list};

/// Legend text for keyboard shortcuts in normal mode.
const LEGEND: &str = " [j/k] Move  [space] Toggle  [a] Add  [e] Edit  [d] Delete  [/] Search  [Tab/1-3] Filter  [p] Priority  [c] Clear done  [X] Clear all  [q] Quit ";

/// Legend text while a text field has focus.
const INPUT_LEGEND: &str = " [Enter] Save  [Esc] Cancel  [Backspace] Delete char ";

/// Legend text while adding, where Tab changes the priority.
const ADD_LEGEND: &str = " [Enter] Add  [Esc] Cancel  [Tab] Priority  [Backspace] Delete char ";

/// Question shown before clearing every task.
pub const CONFIRM_CLEAR_ALL: &str = "Delete all tasks? (y/n)";

/// Draw the entire UI.
pub fn draw<S: KeyValueStorage>(frame: &mut Frame, app: &App<S>) {
    let chunks = create_main_layout(frame.area());

    draw_stats(frame, chunks[0], app);
    draw_filter_tabs(frame, chunks[1], app.store().filter());
    draw_search(frame, chunks[2], app);

    let tasks = app.visible_tasks();
    let editing = app.store().editing().map(|session| session.id);
    render_task_list(frame, chunks[3], &tasks, app.selected_index(), editing);

    draw_input(frame, chunks[4], app);
    draw_legend(frame, chunks[5], app.mode());
}

/// Create the main layout: stats, filter tabs, search, list, input, legend.
fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Statistics header
            Constraint::Length(3), // Filter tabs
            Constraint::Length(1), // Search line
            Constraint::Min(0),    // Task list
            Constraint::Length(3), // Input line
            Constraint::Length(1), // Legend bar
        ])
        .split(area)
        .to_vec()
}

/// Draw the statistics header.
fn draw_stats<S: KeyValueStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let stats = app.store().stats();
    let line = Line::from(vec![
        Span::styled(" Tasklet ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" Total: {}", stats.total)),
        Span::styled(
            format!("  Active: {}", stats.active),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  Completed: {}", stats.completed),
            Style::default().fg(Color::Green),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the filter tab bar.
fn draw_filter_tabs(frame: &mut Frame, area: Rect, active: FilterMode) {
    let titles: Vec<Line> = FilterMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| Line::from(format!("{} {}", i + 1, filter_title(*mode))))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(active.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn filter_title(mode: FilterMode) -> &'static str {
    match mode {
        FilterMode::All => "All",
        FilterMode::Active => "Active",
        FilterMode::Completed => "Completed",
    }
}

/// Draw the search line.
fn draw_search<S: KeyValueStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let query = app.store().search_query();
    let searching = app.mode() == InputMode::Searching;

    let text = if searching {
        format!(" Search: {}_", query)
    } else if query.is_empty() {
        " Search: (press / to search)".to_string()
    } else {
        format!(" Search: {}", query)
    };

    let style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Draw the input line: draft, edit buffer, confirmation, or status.
fn draw_input<S: KeyValueStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let store = app.store();
    let draft = store.draft();

    let (title, line, border) = match app.mode() {
        InputMode::Adding => (
            " New task ",
            Line::from(vec![
                Span::raw(format!("{}_", draft.text)),
                Span::styled(
                    format!("  [{}]", draft.priority),
                    Style::default().fg(priority_color(draft.priority)),
                ),
            ]),
            Color::Yellow,
        ),
        InputMode::Editing => {
            let buffer = store
                .editing()
                .map(|session| session.buffer.as_str())
                .unwrap_or_default();
            (" Edit task ", Line::from(format!("{}_", buffer)), Color::Yellow)
        }
        InputMode::ConfirmClearAll => (
            " Confirm ",
            Line::from(Span::styled(
                CONFIRM_CLEAR_ALL,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Color::Red,
        ),
        InputMode::Normal | InputMode::Searching => {
            let status = app.status().unwrap_or("Press a to add a task");
            (
                " New task ",
                Line::from(vec![
                    Span::styled(status.to_string(), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("  [{}]", draft.priority),
                        Style::default().fg(priority_color(draft.priority)),
                    ),
                ]),
                Color::Cyan,
            )
        }
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

/// Draw the legend bar at the bottom.
fn draw_legend(frame: &mut Frame, area: Rect, mode: InputMode) {
    let text = match mode {
        InputMode::Adding => ADD_LEGEND,
        InputMode::ConfirmClearAll => " [y] Delete everything  [any other key] Keep tasks ",
        mode if mode.is_text_input() => INPUT_LEGEND,
        _ => LEGEND,
    };
    let legend = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(legend, area);
}
