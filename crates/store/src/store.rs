//! The task store
//!
//! [`TaskStore`] owns the task collection together with the transient view
//! and editing state. Every operation that changes the collection writes the
//! whole collection through to storage before returning, then notifies
//! subscribers.

use tracing::{debug, error, warn};

use crate::codec;
use crate::id::IdGenerator;
use crate::models::{FilterMode, Priority, Task, TaskId, created_at_now};
use crate::storage::KeyValueStorage;
use crate::view::{Stats, TaskView};

/// Storage slot holding the serialized collection
pub const STORAGE_KEY: &str = "todos";

/// An edit in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Task being edited
    pub id: TaskId,
    /// Uncommitted text
    pub buffer: String,
}

/// Pending input for the next task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Text typed so far
    pub text: String,
    /// Priority picked for the new task
    pub priority: Priority,
}

/// Notification sent to subscribers after the store changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A task was appended
    Added(TaskId),
    /// A task was removed
    Deleted(TaskId),
    /// A task's completion flag flipped
    Toggled { id: TaskId, completed: bool },
    /// A task's text was replaced
    Edited(TaskId),
    /// Completed tasks were removed
    ClearedCompleted { removed: usize },
    /// Every task was removed
    ClearedAll { removed: usize },
    /// Edit mode started for a task
    EditStarted(TaskId),
    /// The edit buffer changed
    EditBufferChanged,
    /// Edit mode ended without changing any task
    EditCancelled,
    /// The filter mode changed
    FilterChanged(FilterMode),
    /// The search query changed
    SearchChanged,
    /// The new-task draft changed
    DraftChanged,
}

impl StoreEvent {
    /// Whether this event reflects a change to the persisted collection.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StoreEvent::Added(_)
                | StoreEvent::Deleted(_)
                | StoreEvent::Toggled { .. }
                | StoreEvent::Edited(_)
                | StoreEvent::ClearedCompleted { .. }
                | StoreEvent::ClearedAll { .. }
        )
    }
}

/// Handle returned by [`TaskStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with each [`StoreEvent`]
pub type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Owner of the task collection and its transient UI state
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    tasks: Vec<Task>,
    ids: IdGenerator,
    view: TaskView,
    editing: Option<EditSession>,
    draft: Draft,
    clock: fn() -> String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Open a store over `storage`, hydrating the collection from it.
    ///
    /// A missing slot yields an empty collection. An unreadable slot, or one
    /// whose contents do not decode into a valid collection, is logged and
    /// also yields an empty collection; opening never fails.
    pub fn open(storage: S) -> Self {
        let tasks = load_collection(&storage);
        let ids = IdGenerator::seeded_from(&tasks);
        debug!("Opened task store with {} tasks", tasks.len());

        Self {
            storage,
            tasks,
            ids,
            view: TaskView::default(),
            editing: None,
            draft: Draft::default(),
            clock: created_at_now,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replace the source of `createdAt` strings.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Current filter and search settings.
    pub fn view(&self) -> &TaskView {
        &self.view
    }

    /// Current filter mode.
    pub fn filter(&self) -> FilterMode {
        self.view.filter
    }

    /// Current search query.
    pub fn search_query(&self) -> &str {
        &self.view.search
    }

    /// Tasks passing the current filter and search, in collection order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.view.apply(&self.tasks)
    }

    /// Counts over the whole collection, ignoring filter and search.
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.tasks)
    }

    /// The edit in progress, if any.
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Whether `id` is the task currently being edited.
    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing.as_ref().is_some_and(|e| e.id == id)
    }

    /// Pending input for the next task.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // ---------------------------------------------------------------------
    // Mutations (written through to storage)
    // ---------------------------------------------------------------------

    /// Append a new task.
    ///
    /// `text` is trimmed; blank text is ignored and `None` is returned.
    /// On success the draft is reset to empty text and medium priority.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring task with empty text");
            return None;
        }

        let Some(id) = self.ids.next_id(&self.tasks) else {
            warn!("No free task id left, ignoring new task");
            return None;
        };
        let task = Task::new(id, text, priority, (self.clock)());
        debug!("Adding task {}: {}", id, task.text);
        self.tasks.push(task);
        self.draft = Draft::default();

        self.persist();
        self.notify(StoreEvent::Added(id));
        Some(id)
    }

    /// Add a task from the current draft.
    ///
    /// A blank draft is left untouched so the caller can correct it.
    pub fn submit_draft(&mut self) -> Option<TaskId> {
        let Draft { text, priority } = self.draft.clone();
        self.add(&text, priority)
    }

    /// Remove the task with `id`. Unknown ids are ignored.
    ///
    /// Returns `true` if a task was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!("Deleted task {}", id);
            self.drop_stale_edit();
        } else {
            debug!("Delete ignored, task {} not found", id);
        }

        self.persist();
        if removed {
            self.notify(StoreEvent::Deleted(id));
        }
        removed
    }

    /// Flip the completion flag of the task with `id`.
    ///
    /// Returns the new flag, or `None` if no such task exists.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let completed = self.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.completed = !task.completed;
            task.completed
        });
        match completed {
            Some(c) => debug!("Toggled task {} to completed={}", id, c),
            None => debug!("Toggle ignored, task {} not found", id),
        }

        self.persist();
        if let Some(completed) = completed {
            self.notify(StoreEvent::Toggled { id, completed });
        }
        completed
    }

    /// Commit the edit buffer as the text of the task with `id`.
    ///
    /// A blank buffer is ignored and edit mode stays as it was. Otherwise
    /// the task's text is replaced (if the task still exists) and edit mode
    /// ends. Returns `true` if a task's text changed.
    pub fn save_edit(&mut self, id: TaskId) -> bool {
        let text = match &self.editing {
            Some(session) => session.buffer.trim().to_string(),
            None => String::new(),
        };
        if text.is_empty() {
            debug!("Ignoring edit of task {} with empty text", id);
            return false;
        }

        let edited = match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text;
                true
            }
            None => false,
        };
        self.editing = None;

        self.persist();
        if edited {
            debug!("Edited task {}", id);
            self.notify(StoreEvent::Edited(id));
        } else {
            debug!("Edit target {} no longer exists", id);
            self.notify(StoreEvent::EditCancelled);
        }
        edited
    }

    /// Remove every completed task. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        debug!("Cleared {} completed tasks", removed);
        self.drop_stale_edit();

        self.persist();
        self.notify(StoreEvent::ClearedCompleted { removed });
        removed
    }

    /// Remove every task. Returns how many were removed.
    ///
    /// This is unconditional; asking the user for confirmation is up to the
    /// caller.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.tasks.len();
        self.tasks.clear();
        self.editing = None;
        debug!("Cleared all {} tasks", removed);

        self.persist();
        self.notify(StoreEvent::ClearedAll { removed });
        removed
    }

    // ---------------------------------------------------------------------
    // Transient state (never persisted)
    // ---------------------------------------------------------------------

    /// Enter edit mode for `id`, replacing any edit already in progress.
    pub fn start_edit(&mut self, id: TaskId, current_text: &str) {
        self.editing = Some(EditSession {
            id,
            buffer: current_text.to_string(),
        });
        self.notify(StoreEvent::EditStarted(id));
    }

    /// Replace the edit buffer. Ignored when not editing.
    pub fn set_edit_buffer(&mut self, text: &str) {
        if let Some(session) = self.editing.as_mut() {
            session.buffer = text.to_string();
            self.notify(StoreEvent::EditBufferChanged);
        }
    }

    /// Leave edit mode without touching any task.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.notify(StoreEvent::EditCancelled);
    }

    /// Change the filter mode.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.view.filter = mode;
        self.notify(StoreEvent::FilterChanged(mode));
    }

    /// Change the search query.
    pub fn set_search_query(&mut self, query: &str) {
        self.view.search = query.to_string();
        self.notify(StoreEvent::SearchChanged);
    }

    /// Replace the draft text.
    pub fn set_draft_text(&mut self, text: &str) {
        self.draft.text = text.to_string();
        self.notify(StoreEvent::DraftChanged);
    }

    /// Replace the draft priority.
    pub fn set_draft_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
        self.notify(StoreEvent::DraftChanged);
    }

    // ---------------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------------

    /// Register a listener called after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Write the full collection to storage. Failures are logged only.
    fn persist(&self) {
        let raw = match codec::encode(&self.tasks) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Could not encode tasks: {}", e.full_message());
                return;
            }
        };
        if let Err(e) = self.storage.save(STORAGE_KEY, &raw) {
            warn!("Could not save tasks: {}", e.full_message());
        }
    }

    /// End the edit session if its task is gone.
    fn drop_stale_edit(&mut self) {
        if let Some(session) = &self.editing
            && !self.tasks.iter().any(|t| t.id == session.id)
        {
            self.editing = None;
        }
    }
}

/// Read and decode the persisted collection, degrading to empty.
fn load_collection<S: KeyValueStorage>(storage: &S) -> Vec<Task> {
    let raw = match storage.load(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No saved tasks, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!("Could not read saved tasks, starting empty: {}", e.full_message());
            return Vec::new();
        }
    };

    match codec::decode(&raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("Error loading tasks, starting empty: {}", e.full_message());
            Vec::new()
        }
    }
}
