//! Output formatting module for Tasklet
//!
//! Provides table formatting and display utilities for CLI output.

use tasklet_store::{Stats, Task};

/// Maximum width for the text column before truncation
const MAX_TEXT_WIDTH: usize = 40;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    let len = s.chars().count();
    if len <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Completion marker shown in the Done column.
fn format_done(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Format tasks into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID             Done  Priority  Created                  Text
/// -------------  ----  --------  -----------------------  ---------
/// 1760886245000  [ ]   high      10/19/2026, 3:04:05 PM   Buy milk
/// ```
///
/// Returns "No tasks found." for an empty slice.
pub fn format_task_table(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let headers = ["ID", "Done", "Priority", "Created", "Text"];

    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max(headers[0].len());

    let done_width = headers[1].len();

    let priority_width = tasks
        .iter()
        .map(|t| t.priority.as_str().len())
        .max()
        .unwrap_or(0)
        .max(headers[2].len());

    let created_width = tasks
        .iter()
        .map(|t| t.created_at.chars().count())
        .max()
        .unwrap_or(0)
        .max(headers[3].len());

    let text_width = tasks
        .iter()
        .map(|t| t.text.chars().count().min(MAX_TEXT_WIDTH))
        .max()
        .unwrap_or(0)
        .max(headers[4].len());

    let mut output = String::new();

    // Header row
    output.push_str(&format!(
        "{:<id_w$}  {:<done_w$}  {:<priority_w$}  {:<created_w$}  {:<text_w$}\n",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        headers[4],
        id_w = id_width,
        done_w = done_width,
        priority_w = priority_width,
        created_w = created_width,
        text_w = text_width,
    ));

    // Separator row
    output.push_str(&format!(
        "{:->id_w$}  {:->done_w$}  {:->priority_w$}  {:->created_w$}  {:->text_w$}\n",
        "",
        "",
        "",
        "",
        "",
        id_w = id_width,
        done_w = done_width,
        priority_w = priority_width,
        created_w = created_width,
        text_w = text_width,
    ));

    // Data rows; the last column is not padded
    for task in tasks {
        output.push_str(&format!(
            "{:<id_w$}  {:<done_w$}  {:<priority_w$}  {:<created_w$}  {}\n",
            task.id,
            format_done(task.completed),
            task.priority.as_str(),
            task.created_at,
            truncate(&task.text, MAX_TEXT_WIDTH),
            id_w = id_width,
            done_w = done_width,
            priority_w = priority_width,
            created_w = created_width,
        ));
    }

    // Remove trailing newline
    output.pop();

    output
}

/// Format the statistics block printed by `tl stats`.
pub fn format_stats(stats: &Stats) -> String {
    format!(
        "Total:     {}\nActive:    {}\nCompleted: {}",
        stats.total, stats.active, stats.completed
    )
}
