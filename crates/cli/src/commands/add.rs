//! Add command for creating new tasks
//!
//! Implements the `tl add` command.

use clap::Args;
use tasklet_store::{KeyValueStorage, Priority, StoreError, TaskId, TaskStore};

use super::parse_priority;

/// Create a new task
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Text of the task
    #[arg(required = true)]
    pub text: String,

    /// Priority (low, medium, high)
    #[arg(short, long, value_parser = parse_priority, default_value = "medium")]
    pub priority: Priority,
}

impl AddCommand {
    /// Execute the add command.
    ///
    /// Appends the task to the store, which writes it through to storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ValidationError` if the text is blank.
    pub fn execute<S: KeyValueStorage>(&self, store: &mut TaskStore<S>) -> Result<TaskId, StoreError> {
        store
            .add(&self.text, self.priority)
            .ok_or_else(|| StoreError::ValidationError {
                message: "Task text cannot be empty".to_string(),
            })
    }
}
