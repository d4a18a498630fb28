//! Test infrastructure for integration tests
//!
//! Provides isolated data directory setup/teardown and CLI command helpers.
//! Each test gets its own data directory to ensure no shared state.

use std::path::PathBuf;
use tasklet_cli::commands::{
    AddCommand, ClearCommand, Command, DeleteCommand, DoneCommand, EditCommand, ListCommand,
    StatsCommand,
};
use tasklet_store::{
    FileStorage, FilterMode, Priority, STORAGE_KEY, StoreError, TaskId, TaskStore,
    open_file_store,
};

/// Test context containing an isolated file-backed store and its directory
pub struct TestContext {
    pub store: TaskStore<FileStorage>,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an empty data directory.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub fn new() -> Self {
        Self::with_name("ctx")
    }

    /// Create a new test context with a specific suffix for debugging.
    pub fn with_name(name: &str) -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "tl-integration-{}-{}-{:?}-{}",
            name,
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let store = open_file_store(&temp_dir).unwrap();

        Self { store, temp_dir }
    }

    /// Create a context whose data directory already holds `raw` in the task slot.
    pub fn with_saved(raw: &str) -> Self {
        let mut ctx = Self::with_name("saved");
        std::fs::write(ctx.slot_file(), raw).unwrap();
        ctx.reopen();
        ctx
    }

    /// Path of the file holding the saved collection.
    pub fn slot_file(&self) -> PathBuf {
        self.temp_dir.join(format!("{}.json", STORAGE_KEY))
    }

    /// Raw contents of the saved collection, if any.
    pub fn saved_raw(&self) -> Option<String> {
        std::fs::read_to_string(self.slot_file()).ok()
    }

    /// Drop the in-memory store and open a fresh one over the same directory,
    /// as a second `tl` invocation would.
    pub fn reopen(&mut self) {
        self.store = open_file_store(&self.temp_dir).unwrap();
    }

    /// Run a parsed command with a fixed confirmation answer.
    pub fn run(&mut self, cmd: &Command, confirm_answer: bool) -> Result<String, StoreError> {
        cmd.execute(&mut self.store, &mut |_| confirm_answer)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create an AddCommand with medium priority.
pub fn add_cmd(text: &str) -> AddCommand {
    add_cmd_with_priority(text, Priority::Medium)
}

/// Create an AddCommand with a specific priority.
pub fn add_cmd_with_priority(text: &str, priority: Priority) -> AddCommand {
    AddCommand {
        text: text.to_string(),
        priority,
    }
}

/// Create a list command with defaults.
pub fn list_cmd() -> ListCommand {
    ListCommand {
        filter: FilterMode::All,
        search: None,
        json: false,
    }
}

/// Create a list command with a filter and optional search query.
pub fn list_cmd_with(filter: FilterMode, search: Option<&str>) -> ListCommand {
    ListCommand {
        filter,
        search: search.map(String::from),
        json: false,
    }
}

/// Create a done (toggle) command.
pub fn done_cmd(id: TaskId) -> DoneCommand {
    DoneCommand { id }
}

/// Create an edit command.
pub fn edit_cmd(id: TaskId, text: &str) -> EditCommand {
    EditCommand {
        id,
        text: text.to_string(),
    }
}

/// Create a delete command.
pub fn delete_cmd(id: TaskId) -> DeleteCommand {
    DeleteCommand { id }
}

/// Create a clear command.
pub fn clear_cmd(all: bool, yes: bool) -> ClearCommand {
    ClearCommand { all, yes }
}

/// Create a stats command.
pub fn stats_cmd() -> StatsCommand {
    StatsCommand {}
}

// =============================================================================
// Query Helpers
// =============================================================================

/// Texts of all tasks in collection order.
pub fn task_texts(store: &TaskStore<FileStorage>) -> Vec<String> {
    store.tasks().iter().map(|t| t.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creates_isolated_directories() {
        let mut ctx1 = TestContext::new();
        let ctx2 = TestContext::new();

        assert_ne!(
            ctx1.temp_dir, ctx2.temp_dir,
            "Each context should have unique temp dir"
        );

        add_cmd("Only in ctx1").execute(&mut ctx1.store).unwrap();

        assert_eq!(ctx1.store.len(), 1);
        assert!(ctx2.store.is_empty());
        assert!(ctx2.saved_raw().is_none());
    }

    #[test]
    fn test_context_with_name() {
        let ctx = TestContext::with_name("custom");
        assert!(ctx.temp_dir.to_string_lossy().contains("custom"));
    }

    #[test]
    fn test_context_with_saved() {
        let ctx = TestContext::with_saved(
            r#"[{"id":5,"text":"Seeded","completed":true,"priority":"low","createdAt":"1/1/2024, 9:00:00 AM"}]"#,
        );
        assert_eq!(task_texts(&ctx.store), vec!["Seeded"]);
        assert!(ctx.store.tasks()[0].completed);
    }
}
