//! Task store for Tasklet
//!
//! Owns the ordered task collection and its transient view state, derives
//! filtered lists and statistics, and writes the collection through to a
//! key-value storage slot after every change.

pub mod codec;
pub mod error;
pub mod id;
pub mod models;
pub mod storage;
pub mod store;
pub mod view;

pub use error::{StoreError, StoreResult};
pub use models::{FilterMode, Priority, Task, TaskId};
pub use storage::{DATA_DIR_ENV, FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{Draft, EditSession, Listener, STORAGE_KEY, StoreEvent, SubscriptionId, TaskStore};
pub use view::{Stats, TaskView};

use std::path::Path;

/// Open a file-backed task store in `dir`.
///
/// # Errors
///
/// Returns `StoreError::InvalidPath` or `StoreError::CreateDirectory` if the
/// data directory cannot be used. A corrupt or unreadable saved collection is
/// not an error; the store starts empty instead.
pub fn open_file_store(dir: &Path) -> StoreResult<TaskStore<FileStorage>> {
    let storage = FileStorage::open(dir)?;
    Ok(TaskStore::open(storage))
}
