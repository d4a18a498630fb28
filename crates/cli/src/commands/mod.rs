//! CLI commands for Tasklet
//!
//! This module contains all subcommand implementations for the tl CLI.

pub mod add;
pub mod clear;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod stats;

pub use add::AddCommand;
pub use clear::ClearCommand;
pub use delete::DeleteCommand;
pub use done::DoneCommand;
pub use edit::EditCommand;
pub use list::ListCommand;
pub use stats::StatsCommand;

use clap::Subcommand;
use tasklet_store::{FilterMode, KeyValueStorage, Priority, StoreError, TaskId, TaskStore};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new task
    Add(AddCommand),
    /// List tasks, optionally filtered and searched
    List(ListCommand),
    /// Toggle a task between active and completed
    Done(DoneCommand),
    /// Replace the text of a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Remove completed tasks, or every task with --all
    Clear(ClearCommand),
    /// Show task counts
    Stats(StatsCommand),
}

impl Command {
    /// Execute the command against the task store.
    ///
    /// `confirm` is asked before destructive operations that need the
    /// user's agreement; it receives the question and returns the answer.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the command cannot be carried out
    /// (unknown task id, blank text, output encoding failure).
    pub fn execute<S: KeyValueStorage>(
        &self,
        store: &mut TaskStore<S>,
        confirm: &mut dyn FnMut(&str) -> bool,
    ) -> Result<String, StoreError> {
        match self {
            Command::Add(cmd) => cmd.execute(store).map(|id| format!("Created task {}", id)),
            Command::List(cmd) => cmd.execute(store),
            Command::Done(cmd) => cmd.execute(store).map(|r| r.to_string()),
            Command::Edit(cmd) => cmd.execute(store),
            Command::Delete(cmd) => cmd.execute(store),
            Command::Clear(cmd) => cmd.execute(store, confirm),
            Command::Stats(cmd) => Ok(cmd.execute(store)),
        }
    }
}

/// Parse a task id argument
pub(crate) fn parse_id(s: &str) -> Result<TaskId, String> {
    s.parse::<TaskId>()
        .map_err(|_| format!("invalid task id '{}'. Task ids are positive integers", s))
}

/// Parse a priority string into a Priority enum
pub(crate) fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| {
        format!(
            "invalid priority '{}'. Valid values: low, medium, high",
            s
        )
    })
}

/// Parse a filter string into a FilterMode enum
pub(crate) fn parse_filter(s: &str) -> Result<FilterMode, String> {
    FilterMode::parse(s).ok_or_else(|| {
        format!(
            "invalid filter '{}'. Valid values: all, active, completed",
            s
        )
    })
}

/// Look up a task, turning a missing id into `StoreError::NotFound`.
pub(crate) fn require_task<S: KeyValueStorage>(
    store: &TaskStore<S>,
    id: TaskId,
) -> Result<(), StoreError> {
    if store.get(id).is_some() {
        Ok(())
    } else {
        Err(StoreError::NotFound {
            task_id: id.to_string(),
        })
    }
}
