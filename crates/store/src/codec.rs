//! Serialization of the task collection
//!
//! The persisted form is a JSON array of task objects. No schema version is
//! written; a value that does not parse, or holds a task with blank text,
//! is rejected as a whole. Colliding ids are renumbered on load.

use tracing::{trace, warn};

use crate::error::{StoreError, StoreResult};
use crate::id::reassign_duplicates;
use crate::models::Task;

/// Serialize a task collection to its persisted string form.
///
/// # Errors
///
/// Returns `StoreError::Encode` if serialization fails.
pub fn encode(tasks: &[Task]) -> StoreResult<String> {
    serde_json::to_string(tasks).map_err(StoreError::Encode)
}

/// Parse a persisted string back into a task collection.
///
/// # Errors
///
/// Returns `StoreError::Decode` if the string is not a JSON array of tasks.
/// Returns `StoreError::InvalidCollection` if a task has blank text.
pub fn decode(raw: &str) -> StoreResult<Vec<Task>> {
    let mut tasks: Vec<Task> = serde_json::from_str(raw).map_err(StoreError::Decode)?;
    validate(&tasks)?;

    let renumbered = reassign_duplicates(&mut tasks);
    if renumbered > 0 {
        warn!("Renumbered {} tasks with duplicate ids", renumbered);
    }

    trace!("Decoded {} tasks", tasks.len());
    Ok(tasks)
}

/// Check the invariants every collection must hold.
fn validate(tasks: &[Task]) -> StoreResult<()> {
    for task in tasks {
        if task.text.trim().is_empty() {
            return Err(StoreError::InvalidCollection {
                reason: format!("task {} has empty text", task.id),
            });
        }
    }
    Ok(())
}
