//! Done command for toggling task completion
//!
//! Implements the `tl done` command. Running it on a completed task
//! reopens it.

use clap::Args;
use tasklet_store::{KeyValueStorage, StoreError, TaskId, TaskStore};

use super::parse_id;

/// Toggle a task between active and completed
#[derive(Debug, Args)]
pub struct DoneCommand {
    /// Task ID to toggle
    #[arg(required = true, value_parser = parse_id)]
    pub id: TaskId,
}

/// Result of the done command execution
#[derive(Debug, PartialEq, Eq)]
pub struct DoneResult {
    /// The task that was toggled
    pub id: TaskId,
    /// Completion state after the toggle
    pub completed: bool,
}

impl std::fmt::Display for DoneResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.completed {
            write!(f, "Completed task {}", self.id)
        } else {
            write!(f, "Reopened task {}", self.id)
        }
    }
}

impl DoneCommand {
    /// Execute the done command.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no task has the given id.
    pub fn execute<S: KeyValueStorage>(
        &self,
        store: &mut TaskStore<S>,
    ) -> Result<DoneResult, StoreError> {
        let completed = store.toggle(self.id).ok_or_else(|| StoreError::NotFound {
            task_id: self.id.to_string(),
        })?;
        Ok(DoneResult {
            id: self.id,
            completed,
        })
    }
}
