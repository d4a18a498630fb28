//! List command for displaying tasks
//!
//! Implements the `tl list` command to display tasks with filter and
//! search options.

use clap::Args;
use tasklet_store::{FilterMode, KeyValueStorage, StoreError, TaskStore};

use super::parse_filter;
use crate::output::format_task_table;

/// List tasks with optional filter and search
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which tasks to show (all, active, completed)
    #[arg(short, long, value_parser = parse_filter, default_value = "all")]
    pub filter: FilterMode,

    /// Only show tasks whose text contains this (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print the visible tasks as a JSON array instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// Applies the filter and search to the store's view state and renders
    /// the visible tasks. The statistics line under the table always
    /// covers the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Encode` if JSON output cannot be produced.
    pub fn execute<S: KeyValueStorage>(&self, store: &mut TaskStore<S>) -> Result<String, StoreError> {
        store.set_filter(self.filter);
        store.set_search_query(self.search.as_deref().unwrap_or(""));

        let visible = store.visible_tasks();

        if self.json {
            return serde_json::to_string_pretty(&visible).map_err(StoreError::Encode);
        }

        Ok(format!("{}\n\n{}", format_task_table(&visible), store.stats()))
    }
}
