//! End-to-end integration tests for the Tasklet CLI
//!
//! This test suite executes commands through the CLI command interface
//! using an isolated data directory for each test to ensure no shared state.
//!
//! Tests are organized into modules:
//! - `lifecycle` - add, toggle, edit, delete, clear
//! - `persistence` - what a later invocation sees
//! - `queries` - filter, search, and statistics
//! - `error_cases` - error handling tests
//! - `boundary_edge_cases` - unusual text and large collections

mod common;

use common::*;
use tasklet_store::{FilterMode, Priority, StoreError, TaskId};

// =============================================================================
// LIFECYCLE TESTS
// =============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn test_add_creates_active_task() {
        let mut ctx = TestContext::new();

        let id = add_cmd_with_priority("Buy milk", Priority::High)
            .execute(&mut ctx.store)
            .unwrap();

        let task = ctx.store.get(id).unwrap();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
        assert!(!task.created_at.is_empty());
    }

    #[test]
    fn test_add_appends_in_order_with_increasing_ids() {
        let mut ctx = TestContext::new();

        let first = add_cmd("first").execute(&mut ctx.store).unwrap();
        let second = add_cmd("second").execute(&mut ctx.store).unwrap();
        let third = add_cmd("third").execute(&mut ctx.store).unwrap();

        assert!(first < second && second < third);
        assert_eq!(task_texts(&ctx.store), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_done_toggles_completion() {
        let mut ctx = TestContext::new();
        let id = add_cmd("Task").execute(&mut ctx.store).unwrap();

        assert!(done_cmd(id).execute(&mut ctx.store).unwrap().completed);
        assert!(ctx.store.get(id).unwrap().completed);

        assert!(!done_cmd(id).execute(&mut ctx.store).unwrap().completed);
        assert!(!ctx.store.get(id).unwrap().completed);
    }

    #[test]
    fn test_edit_keeps_identity_and_position() {
        let mut ctx = TestContext::new();
        add_cmd("a").execute(&mut ctx.store).unwrap();
        let id = add_cmd("b").execute(&mut ctx.store).unwrap();
        add_cmd("c").execute(&mut ctx.store).unwrap();

        edit_cmd(id, "  B  ").execute(&mut ctx.store).unwrap();

        assert_eq!(task_texts(&ctx.store), vec!["a", "B", "c"]);
        assert_eq!(ctx.store.tasks()[1].id, id);
    }

    #[test]
    fn test_delete_preserves_order_of_others() {
        let mut ctx = TestContext::new();
        add_cmd("a").execute(&mut ctx.store).unwrap();
        let id = add_cmd("b").execute(&mut ctx.store).unwrap();
        add_cmd("c").execute(&mut ctx.store).unwrap();

        delete_cmd(id).execute(&mut ctx.store).unwrap();

        assert_eq!(task_texts(&ctx.store), vec!["a", "c"]);
    }

    #[test]
    fn test_clear_completed_keeps_active() {
        let mut ctx = TestContext::new();
        let a = add_cmd("a").execute(&mut ctx.store).unwrap();
        add_cmd("b").execute(&mut ctx.store).unwrap();
        let c = add_cmd("c").execute(&mut ctx.store).unwrap();
        done_cmd(a).execute(&mut ctx.store).unwrap();
        done_cmd(c).execute(&mut ctx.store).unwrap();

        let output = clear_cmd(false, false)
            .execute(&mut ctx.store, &mut |_| false)
            .unwrap();

        assert_eq!(output, "Removed 2 completed tasks");
        assert_eq!(task_texts(&ctx.store), vec!["b"]);
    }

    #[test]
    fn test_clear_all_requires_confirmation() {
        let mut ctx = TestContext::new();
        add_cmd("a").execute(&mut ctx.store).unwrap();
        add_cmd("b").execute(&mut ctx.store).unwrap();

        let cmd = tasklet_cli::Command::Clear(clear_cmd(true, false));

        ctx.run(&cmd, false).unwrap();
        assert_eq!(ctx.store.len(), 2);

        ctx.run(&cmd, true).unwrap();
        assert!(ctx.store.is_empty());
    }
}

// =============================================================================
// PERSISTENCE TESTS
// =============================================================================

mod persistence {
    use super::*;

    #[test]
    fn test_every_change_is_visible_after_reopen() {
        let mut ctx = TestContext::new();
        let a = add_cmd_with_priority("Buy milk", Priority::Low)
            .execute(&mut ctx.store)
            .unwrap();
        let b = add_cmd("Walk dog").execute(&mut ctx.store).unwrap();
        done_cmd(a).execute(&mut ctx.store).unwrap();
        edit_cmd(b, "Walk the dog").execute(&mut ctx.store).unwrap();

        ctx.reopen();

        assert_eq!(task_texts(&ctx.store), vec!["Buy milk", "Walk the dog"]);
        let milk = ctx.store.get(a).unwrap();
        assert!(milk.completed);
        assert_eq!(milk.priority, Priority::Low);
    }

    #[test]
    fn test_saved_format_uses_created_at_key() {
        let mut ctx = TestContext::new();
        add_cmd("Task").execute(&mut ctx.store).unwrap();

        let raw = ctx.saved_raw().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let task = &value.as_array().unwrap()[0];
        assert!(task["id"].is_u64());
        assert_eq!(task["text"], "Task");
        assert_eq!(task["completed"], false);
        assert_eq!(task["priority"], "medium");
        assert!(task["createdAt"].is_string());
    }

    #[test]
    fn test_ids_after_reopen_stay_unique() {
        let mut ctx = TestContext::with_saved(
            r#"[{"id":9999999999999,"text":"Future","completed":false,"priority":"high","createdAt":"1/1/2030, 1:00:00 PM"}]"#,
        );

        let id = add_cmd("Next").execute(&mut ctx.store).unwrap();

        assert!(id > TaskId(9999999999999));
    }

    #[test]
    fn test_corrupt_save_starts_empty_and_is_repaired() {
        let mut ctx = TestContext::with_saved("{ this is not json");
        assert!(ctx.store.is_empty());

        add_cmd("Fresh start").execute(&mut ctx.store).unwrap();
        ctx.reopen();

        assert_eq!(task_texts(&ctx.store), vec!["Fresh start"]);
    }

    #[test]
    fn test_clear_all_persists_empty_collection() {
        let mut ctx = TestContext::new();
        add_cmd("a").execute(&mut ctx.store).unwrap();
        clear_cmd(true, true)
            .execute(&mut ctx.store, &mut |_| false)
            .unwrap();

        assert_eq!(ctx.saved_raw().as_deref(), Some("[]"));
        ctx.reopen();
        assert!(ctx.store.is_empty());
    }

    #[test]
    fn test_list_does_not_rewrite_save() {
        let mut ctx = TestContext::new();
        add_cmd("a").execute(&mut ctx.store).unwrap();
        let before = ctx.saved_raw();

        list_cmd_with(FilterMode::Completed, Some("zzz"))
            .execute(&mut ctx.store)
            .unwrap();

        assert_eq!(ctx.saved_raw(), before);
    }
}

// =============================================================================
// QUERY TESTS
// =============================================================================

mod queries {
    use super::*;

    fn seeded() -> TestContext {
        let mut ctx = TestContext::new();
        add_cmd("Buy milk").execute(&mut ctx.store).unwrap();
        let bread = add_cmd("Buy bread").execute(&mut ctx.store).unwrap();
        add_cmd("Call mom").execute(&mut ctx.store).unwrap();
        done_cmd(bread).execute(&mut ctx.store).unwrap();
        ctx
    }

    #[test]
    fn test_list_all() {
        let mut ctx = seeded();
        let output = list_cmd().execute(&mut ctx.store).unwrap();

        assert!(output.contains("Buy milk"));
        assert!(output.contains("Buy bread"));
        assert!(output.contains("Call mom"));
        assert!(output.ends_with("3 total, 2 active, 1 completed"));
    }

    #[test]
    fn test_list_completed_only() {
        let mut ctx = seeded();
        let output = list_cmd_with(FilterMode::Completed, None)
            .execute(&mut ctx.store)
            .unwrap();

        assert!(output.contains("Buy bread"));
        assert!(!output.contains("Buy milk"));
        assert!(!output.contains("Call mom"));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut ctx = seeded();
        let output = list_cmd_with(FilterMode::All, Some("bUy"))
            .execute(&mut ctx.store)
            .unwrap();

        assert!(output.contains("Buy milk"));
        assert!(output.contains("Buy bread"));
        assert!(!output.contains("Call mom"));
    }

    #[test]
    fn test_filter_and_search_combine() {
        let mut ctx = seeded();
        let output = list_cmd_with(FilterMode::Active, Some("buy"))
            .execute(&mut ctx.store)
            .unwrap();

        assert!(output.contains("Buy milk"));
        assert!(!output.contains("Buy bread"));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let mut ctx = seeded();
        let output = list_cmd_with(FilterMode::All, Some(""))
            .execute(&mut ctx.store)
            .unwrap();

        assert!(output.contains("Buy milk"));
        assert!(output.contains("Call mom"));
    }

    #[test]
    fn test_stats_command() {
        let mut ctx = seeded();
        let output = ctx
            .run(&tasklet_cli::Command::Stats(stats_cmd()), false)
            .unwrap();
        assert_eq!(output, "Total:     3\nActive:    2\nCompleted: 1");
    }

    #[test]
    fn test_list_empty_store() {
        let mut ctx = TestContext::new();
        let output = list_cmd().execute(&mut ctx.store).unwrap();
        assert!(output.starts_with("No tasks found."));
        assert!(output.ends_with("0 total, 0 active, 0 completed"));
    }
}

// =============================================================================
// ERROR CASE TESTS
// =============================================================================

mod error_cases {
    use super::*;

    #[test]
    fn test_add_blank_text_fails_without_saving() {
        let mut ctx = TestContext::new();

        let result = add_cmd(" \t ").execute(&mut ctx.store);

        assert!(matches!(result, Err(StoreError::ValidationError { .. })));
        assert!(ctx.saved_raw().is_none());
    }

    #[test]
    fn test_edit_blank_text_fails() {
        let mut ctx = TestContext::new();
        let id = add_cmd("Keep me").execute(&mut ctx.store).unwrap();

        let result = edit_cmd(id, "").execute(&mut ctx.store);

        assert!(matches!(result, Err(StoreError::ValidationError { .. })));
        assert_eq!(task_texts(&ctx.store), vec!["Keep me"]);
    }

    #[test]
    fn test_unknown_id_errors() {
        let mut ctx = TestContext::new();
        add_cmd("Only").execute(&mut ctx.store).unwrap();
        let missing = TaskId(1);

        assert!(matches!(
            done_cmd(missing).execute(&mut ctx.store),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            edit_cmd(missing, "x").execute(&mut ctx.store),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            delete_cmd(missing).execute(&mut ctx.store),
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(ctx.store.len(), 1);
    }

    #[test]
    fn test_not_found_message() {
        let mut ctx = TestContext::new();
        let err = delete_cmd(TaskId(42)).execute(&mut ctx.store).unwrap_err();
        assert_eq!(err.to_string(), "Task '42' not found");
    }
}

// =============================================================================
// BOUNDARY AND EDGE CASE TESTS
// =============================================================================

mod boundary_edge_cases {
    use super::*;

    #[test]
    fn test_very_long_text() {
        let mut ctx = TestContext::new();

        let long_text = "A".repeat(10000);
        let id = add_cmd(&long_text).execute(&mut ctx.store).unwrap();
        ctx.reopen();

        assert_eq!(ctx.store.get(id).unwrap().text, long_text);
    }

    #[test]
    fn test_text_with_quotes() {
        let mut ctx = TestContext::new();

        let text = r#"Task with "quotes" and 'apostrophes'"#;
        let id = add_cmd(text).execute(&mut ctx.store).unwrap();
        ctx.reopen();

        assert_eq!(ctx.store.get(id).unwrap().text, text);
    }

    #[test]
    fn test_text_with_unicode() {
        let mut ctx = TestContext::new();

        let text = "\u{1F600} Happy Task \u{4E2D}\u{6587}";
        let id = add_cmd(text).execute(&mut ctx.store).unwrap();

        let output = list_cmd_with(FilterMode::All, Some("happy"))
            .execute(&mut ctx.store)
            .unwrap();
        assert!(output.contains(text));
        assert_eq!(ctx.store.get(id).unwrap().text, text);
    }

    #[test]
    fn test_many_tasks() {
        let mut ctx = TestContext::new();

        for i in 0..100 {
            add_cmd(&format!("Task {}", i))
                .execute(&mut ctx.store)
                .unwrap();
        }
        ctx.reopen();

        assert_eq!(ctx.store.len(), 100);
        assert_eq!(ctx.store.stats().active, 100);
    }
}
