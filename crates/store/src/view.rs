//! Derived views over the task collection
//!
//! Filtering, search and statistics are pure functions of the collection
//! and the current view settings. Nothing here is cached; callers recompute
//! after every change.

use crate::models::{FilterMode, Task};

/// View criteria for the task list
///
/// The filter mode and the search query combine with AND semantics.
/// An empty query matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskView {
    /// Completion filter
    pub filter: FilterMode,
    /// Case-insensitive substring to look for in task text
    pub search: String,
}

impl TaskView {
    /// Create a view showing every task
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the completion filter
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Set the search query
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Whether a task is visible under this view.
    pub fn matches(&self, task: &Task) -> bool {
        self.filter.matches(task) && matches_search(task, &self.search)
    }

    /// Tasks visible under this view, in collection order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Case-insensitive substring match; an empty query matches everything.
pub fn matches_search(task: &Task, query: &str) -> bool {
    query.is_empty() || task.text.to_lowercase().contains(&query.to_lowercase())
}

/// Counts over the whole, unfiltered collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of tasks
    pub total: usize,
    /// Tasks not yet completed
    pub active: usize,
    /// Completed tasks
    pub completed: usize,
}

impl Stats {
    /// Count tasks by completion state.
    pub fn compute(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} total, {} active, {} completed",
            self.total, self.active, self.completed
        )
    }
}
