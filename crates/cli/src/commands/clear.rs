//! Clear command for bulk removal
//!
//! Implements the `tl clear` command. Without flags it removes completed
//! tasks; `--all` removes everything and asks for confirmation unless
//! `--yes` is given.

use clap::Args;
use tasklet_store::{KeyValueStorage, StoreError, TaskStore};

/// Question asked before clearing every task
pub const CLEAR_ALL_PROMPT: &str = "Delete all tasks?";

/// Remove completed tasks, or every task with --all
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Remove every task, not only completed ones
    #[arg(long)]
    pub all: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl ClearCommand {
    /// Execute the clear command.
    ///
    /// `confirm` is called with [`CLEAR_ALL_PROMPT`] when `--all` is given
    /// without `--yes`; a `false` answer leaves the store untouched.
    pub fn execute<S: KeyValueStorage>(
        &self,
        store: &mut TaskStore<S>,
        confirm: &mut dyn FnMut(&str) -> bool,
    ) -> Result<String, StoreError> {
        if !self.all {
            let removed = store.clear_completed();
            return Ok(format!("Removed {} completed {}", removed, plural(removed)));
        }

        if !self.yes && !confirm(CLEAR_ALL_PROMPT) {
            return Ok("Aborted, no tasks removed".to_string());
        }

        let removed = store.clear_all();
        Ok(format!("Removed {} {}", removed, plural(removed)))
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "task" } else { "tasks" }
}
