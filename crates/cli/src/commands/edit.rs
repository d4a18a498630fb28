//! Edit command for replacing task text
//!
//! Implements the `tl edit` command. The edit goes through the store's
//! edit session so the same validation applies as in the TUI.

use clap::Args;
use tasklet_store::{KeyValueStorage, StoreError, TaskId, TaskStore};

use super::{parse_id, require_task};

/// Replace the text of a task
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Task ID to edit
    #[arg(required = true, value_parser = parse_id)]
    pub id: TaskId,

    /// New task text
    #[arg(required = true)]
    pub text: String,
}

impl EditCommand {
    /// Execute the edit command.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no task has the given id.
    /// Returns `StoreError::ValidationError` if the new text is blank.
    pub fn execute<S: KeyValueStorage>(&self, store: &mut TaskStore<S>) -> Result<String, StoreError> {
        require_task(store, self.id)?;

        let current = store
            .get(self.id)
            .map(|t| t.text.clone())
            .unwrap_or_default();
        store.start_edit(self.id, &current);
        store.set_edit_buffer(&self.text);

        if !store.save_edit(self.id) {
            store.cancel_edit();
            return Err(StoreError::ValidationError {
                message: "Task text cannot be empty".to_string(),
            });
        }

        Ok(format!("Updated task {}", self.id))
    }
}
