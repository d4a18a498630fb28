//! TUI module for Tasklet
//!
//! Provides a terminal user interface for managing a Tasklet task list
//! using ratatui and crossterm.

pub mod app;
pub mod error;
pub mod event;
pub mod task_list;
pub mod ui;

pub use app::{App, InputMode};
pub use error::{TuiError, TuiResult};
