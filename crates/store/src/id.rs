//! Task id generation
//!
//! Ids come from a monotonic counter. The counter starts above every id
//! already in the collection and above the current Unix time in
//! milliseconds, so freshly created ids look like the timestamp ids found
//! in older data but can never collide, however fast tasks are created.
//!
//! A counter that has reached `u64::MAX` falls back to the lowest id no
//! task holds, scanning upward from a cursor that only moves forward.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Task, TaskId};

/// Monotonic source of task ids
#[derive(Debug, Clone)]
pub struct IdGenerator {
    /// Next counter value, `None` once the counter is exhausted.
    next: Option<u64>,
    /// Where the scan for a free id resumes after exhaustion.
    cursor: u64,
}

impl IdGenerator {
    /// Create a generator that never yields an id present in `existing`.
    pub fn seeded_from(existing: &[Task]) -> Self {
        Self::with_floor(existing, now_millis())
    }

    /// Like [`IdGenerator::seeded_from`] with an explicit lower bound.
    pub fn with_floor(existing: &[Task], floor: u64) -> Self {
        let next = match existing.iter().map(|t| t.id.get()).max() {
            Some(largest) => largest.checked_add(1).map(|above| above.max(floor)),
            None => Some(floor),
        };
        Self { next, cursor: 0 }
    }

    /// Hand out the next id not held by any task in `existing`.
    ///
    /// Returns `None` only when every candidate id is taken.
    pub fn next_id(&mut self, existing: &[Task]) -> Option<TaskId> {
        if let Some(id) = self.next {
            self.next = id.checked_add(1);
            return Some(TaskId(id));
        }

        let taken: HashSet<u64> = existing.iter().map(|t| t.id.get()).collect();
        let mut candidate = self.cursor;
        while taken.contains(&candidate) {
            candidate = candidate.checked_add(1)?;
        }
        self.cursor = candidate.checked_add(1)?;
        Some(TaskId(candidate))
    }
}

/// Give every task whose id already appeared earlier in the collection a
/// fresh id. The first holder of an id keeps it.
///
/// Returns the number of tasks renumbered.
pub fn reassign_duplicates(tasks: &mut [Task]) -> usize {
    let mut seen = HashSet::with_capacity(tasks.len());
    let duplicates: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| !seen.insert(task.id))
        .map(|(i, _)| i)
        .collect();
    if duplicates.is_empty() {
        return 0;
    }

    let mut ids = IdGenerator::with_floor(tasks, 0);
    let mut renumbered = 0;
    for i in duplicates {
        let Some(id) = ids.next_id(tasks) else {
            break;
        };
        tasks[i].id = id;
        renumbered += 1;
    }
    renumbered
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
