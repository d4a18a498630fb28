//! Data models for Tasklet
//!
//! Defines the task record as it is persisted, plus the small enums used
//! by the store and its derived views.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Display format for `createdAt`, matching the en-US locale rendering
/// (`10/19/2026, 3:04:05 PM`).
pub const CREATED_AT_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Unique task identifier
///
/// Serialized as a bare integer so persisted collections stay readable
/// by anything that stored millisecond-timestamp ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Returns the raw integer value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(TaskId)
    }
}

/// Task priority level
///
/// Fixed at creation; there is no operation that changes it afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Returns the string representation used in persisted data
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a priority from its string form (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Cycle low -> medium -> high -> low.
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which tasks the filtered view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    /// Every filter mode in display order
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Completed];

    /// Returns the string representation used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Active => "active",
            FilterMode::Completed => "completed",
        }
    }

    /// Parse a filter mode from its string form (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(FilterMode::All),
            "active" => Some(FilterMode::Active),
            "completed" => Some(FilterMode::Completed),
            _ => None,
        }
    }

    /// Whether a task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }

    /// Cycle all -> active -> completed -> all.
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Active,
            FilterMode::Active => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }

    /// Position in [`FilterMode::ALL`]
    pub fn index(self) -> usize {
        match self {
            FilterMode::All => 0,
            FilterMode::Active => 1,
            FilterMode::Completed => 2,
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single to-do item
///
/// Field names on the wire are `id`, `text`, `completed`, `priority` and
/// `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identity key, never reused within a session
    pub id: TaskId,

    /// Trimmed, non-empty task text
    pub text: String,

    /// Completion flag
    pub completed: bool,

    /// Priority chosen at creation
    pub priority: Priority,

    /// Human-readable creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(
        id: TaskId,
        text: impl Into<String>,
        priority: Priority,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            priority,
            created_at: created_at.into(),
        }
    }

    /// Mark this task as completed (builder style)
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Render a creation timestamp in [`CREATED_AT_FORMAT`].
pub fn format_created_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(CREATED_AT_FORMAT).to_string()
}

/// The current local time in [`CREATED_AT_FORMAT`].
pub fn created_at_now() -> String {
    format_created_at(&Local::now())
}
