//! Stats command
//!
//! Implements the `tl stats` command.

use clap::Args;
use tasklet_store::{KeyValueStorage, TaskStore};

use crate::output::format_stats;

/// Show task counts
#[derive(Debug, Args)]
pub struct StatsCommand {}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute<S: KeyValueStorage>(&self, store: &TaskStore<S>) -> String {
        format_stats(&store.stats())
    }
}
