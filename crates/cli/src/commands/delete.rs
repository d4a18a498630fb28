//! Delete command for removing a task
//!
//! Implements the `tl delete` command.

use clap::Args;
use tasklet_store::{KeyValueStorage, StoreError, TaskId, TaskStore};

use super::parse_id;

/// Delete a task
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Task ID to delete
    #[arg(required = true, value_parser = parse_id)]
    pub id: TaskId,
}

impl DeleteCommand {
    /// Execute the delete command.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no task has the given id.
    pub fn execute<S: KeyValueStorage>(&self, store: &mut TaskStore<S>) -> Result<String, StoreError> {
        if !store.delete(self.id) {
            return Err(StoreError::NotFound {
                task_id: self.id.to_string(),
            });
        }
        Ok(format!("Deleted task {}", self.id))
    }
}
