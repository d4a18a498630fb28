//! Main application state and event loop.

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;

use tasklet_store::{
    FileStorage, FilterMode, KeyValueStorage, StoreEvent, SubscriptionId, Task, TaskId, TaskStore,
    open_file_store,
};

use crate::error::TuiResult;
use crate::event::{
    is_backspace, is_command, is_down, is_enter, is_escape, is_interrupt, is_quit, is_tab, is_up,
    poll_key, typed_char,
};
use crate::ui;

/// What keystrokes are currently routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands.
    #[default]
    Normal,
    /// Keys edit the new-task draft.
    Adding,
    /// Keys edit the text of an existing task.
    Editing,
    /// Keys edit the search query.
    Searching,
    /// Waiting for a y/n answer before clearing every task.
    ConfirmClearAll,
}

impl InputMode {
    /// Whether keys are inserted into a text field.
    pub fn is_text_input(self) -> bool {
        matches!(self, Self::Adding | Self::Editing | Self::Searching)
    }
}

/// Main application state.
pub struct App<S: KeyValueStorage> {
    /// The task store.
    store: TaskStore<S>,
    /// Ids of the tasks shown in the list, in display order.
    visible: Vec<TaskId>,
    /// Index of the currently selected task in the list.
    selected_index: usize,
    /// Current input mode.
    mode: InputMode,
    /// Whether the application is still running.
    running: bool,
    /// Events received from the store since the last refresh.
    pending: Rc<RefCell<Vec<StoreEvent>>>,
    /// Subscription delivering into `pending`.
    subscription: SubscriptionId,
    /// Outcome of the last change, shown under the list.
    status: Option<String>,
}

impl App<FileStorage> {
    /// Open the file-backed store and create the app over it.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Optional data directory. If `None`, the
    ///   `TASKLET_DATA_DIR` environment variable or the platform default
    ///   is used.
    ///
    /// # Errors
    ///
    /// Returns `TuiError::Store` if the data directory cannot be used.
    pub fn open(data_dir: Option<PathBuf>) -> TuiResult<Self> {
        let path = FileStorage::resolve_path(data_dir);
        let store = open_file_store(&path)?;
        Ok(Self::new(store))
    }
}

impl<S: KeyValueStorage> App<S> {
    /// Create a new App over an already opened store.
    pub fn new(mut store: TaskStore<S>) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        let subscription = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let mut app = Self {
            store,
            visible: Vec::new(),
            selected_index: 0,
            mode: InputMode::default(),
            running: true,
            pending,
            subscription,
            status: None,
        };
        app.refresh_visible();
        app
    }

    /// Get a reference to the task store.
    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Get the currently selected task index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Get the current input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Check if the application is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the status message describing the last change, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Tasks shown in the list, in display order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.visible
            .iter()
            .filter_map(|id| self.store.get(*id))
            .collect()
    }

    /// Get the currently selected task, if any.
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible
            .get(self.selected_index)
            .and_then(|id| self.store.get(*id))
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Move selection down in the task list.
    ///
    /// Clamps to the last item (does not wrap).
    pub fn select_next(&mut self) {
        let max_items = self.visible.len();
        if max_items > 0 && self.selected_index < max_items - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up in the task list.
    ///
    /// Clamps to the first item (does not wrap).
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Drain store events and rebuild the visible list if any arrived.
    pub fn sync(&mut self) {
        let events: Vec<StoreEvent> = self.pending.borrow_mut().drain(..).collect();
        if events.is_empty() {
            return;
        }

        for event in &events {
            if let Some(message) = describe(event) {
                self.status = Some(message);
            }
        }
        if let Some(StoreEvent::Added(id)) = events.iter().rev().find(|e| e.is_mutation()) {
            let id = *id;
            self.refresh_visible();
            if let Some(pos) = self.visible.iter().position(|v| *v == id) {
                self.selected_index = pos;
            }
            return;
        }
        self.refresh_visible();
    }

    /// Rebuild the visible list from the store and clamp the selection.
    fn refresh_visible(&mut self) {
        self.visible = self.store.visible_tasks().iter().map(|t| t.id).collect();
        if self.visible.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len() - 1;
        }
    }

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        // The guard runs restore_terminal() even if we panic
        let _guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let result = self.event_loop(&mut terminal);

        drop(_guard);

        result
    }

    /// The main event loop.
    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> TuiResult<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(key) = poll_key(Duration::from_millis(100))? {
                self.handle_key(&key);
            }
        }
        Ok(())
    }

    /// Handle a keyboard event.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if is_interrupt(key) {
            self.quit();
            return;
        }

        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Adding => self.handle_adding_key(key),
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Searching => self.handle_search_key(key),
            InputMode::ConfirmClearAll => self.handle_confirm_key(key),
        }

        self.sync();
    }

    fn handle_normal_key(&mut self, key: &KeyEvent) {
        if is_quit(key) {
            self.quit();
        } else if is_down(key) {
            self.select_next();
        } else if is_up(key) {
            self.select_previous();
        } else if is_tab(key) {
            let next = self.store.filter().next();
            self.store.set_filter(next);
        } else if let Some(mode) = filter_shortcut(key) {
            self.store.set_filter(mode);
        } else if is_command(key, ' ') {
            if let Some(id) = self.selected_id() {
                self.store.toggle(id);
            }
        } else if is_command(key, 'a') {
            self.mode = InputMode::Adding;
        } else if is_command(key, 'e') {
            if let Some(task) = self.selected_task() {
                let (id, text) = (task.id, task.text.clone());
                self.store.start_edit(id, &text);
                self.mode = InputMode::Editing;
            }
        } else if is_command(key, 'd') {
            if let Some(id) = self.selected_id() {
                self.store.delete(id);
            }
        } else if is_command(key, '/') {
            self.mode = InputMode::Searching;
        } else if is_command(key, 'p') {
            let next = self.store.draft().priority.next();
            self.store.set_draft_priority(next);
        } else if is_command(key, 'c') {
            self.store.clear_completed();
        } else if is_command(key, 'X') {
            self.mode = InputMode::ConfirmClearAll;
        } else if is_escape(key) && !self.store.search_query().is_empty() {
            self.store.set_search_query("");
        }
    }

    fn handle_adding_key(&mut self, key: &KeyEvent) {
        if is_enter(key) {
            // A blank draft is ignored and the field stays open
            if self.store.submit_draft().is_some() {
                self.mode = InputMode::Normal;
            }
        } else if is_escape(key) {
            self.mode = InputMode::Normal;
        } else if is_tab(key) {
            let next = self.store.draft().priority.next();
            self.store.set_draft_priority(next);
        } else if is_backspace(key) {
            let mut text = self.store.draft().text.clone();
            text.pop();
            self.store.set_draft_text(&text);
        } else if let Some(c) = typed_char(key) {
            let text = format!("{}{}", self.store.draft().text, c);
            self.store.set_draft_text(&text);
        }
    }

    fn handle_editing_key(&mut self, key: &KeyEvent) {
        let Some(session) = self.store.editing() else {
            self.mode = InputMode::Normal;
            return;
        };
        let (id, mut buffer) = (session.id, session.buffer.clone());

        if is_enter(key) {
            self.store.save_edit(id);
            if self.store.editing().is_none() {
                self.mode = InputMode::Normal;
            }
        } else if is_escape(key) {
            self.store.cancel_edit();
            self.mode = InputMode::Normal;
        } else if is_backspace(key) {
            buffer.pop();
            self.store.set_edit_buffer(&buffer);
        } else if let Some(c) = typed_char(key) {
            buffer.push(c);
            self.store.set_edit_buffer(&buffer);
        }
    }

    fn handle_search_key(&mut self, key: &KeyEvent) {
        if is_enter(key) {
            self.mode = InputMode::Normal;
        } else if is_escape(key) {
            self.store.set_search_query("");
            self.mode = InputMode::Normal;
        } else if is_backspace(key) {
            let mut query = self.store.search_query().to_string();
            query.pop();
            self.store.set_search_query(&query);
        } else if let Some(c) = typed_char(key) {
            let query = format!("{}{}", self.store.search_query(), c);
            self.store.set_search_query(&query);
        }
    }

    fn handle_confirm_key(&mut self, key: &KeyEvent) {
        if is_command(key, 'y') || is_command(key, 'Y') {
            self.store.clear_all();
        } else {
            self.status = Some("Clear all cancelled".to_string());
        }
        self.mode = InputMode::Normal;
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.visible.get(self.selected_index).copied()
    }
}

impl<S: KeyValueStorage> Drop for App<S> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

/// Map `1`/`2`/`3` to a filter mode.
fn filter_shortcut(key: &KeyEvent) -> Option<FilterMode> {
    FilterMode::ALL
        .iter()
        .enumerate()
        .find(|(i, _)| {
            char::from_digit(*i as u32 + 1, 10).is_some_and(|digit| is_command(key, digit))
        })
        .map(|(_, mode)| *mode)
}

/// Status line text for a collection change.
fn describe(event: &StoreEvent) -> Option<String> {
    let message = match event {
        StoreEvent::Added(_) => "Task added".to_string(),
        StoreEvent::Deleted(_) => "Task deleted".to_string(),
        StoreEvent::Toggled { completed: true, .. } => "Task completed".to_string(),
        StoreEvent::Toggled {
            completed: false, ..
        } => "Task reopened".to_string(),
        StoreEvent::Edited(_) => "Task updated".to_string(),
        StoreEvent::ClearedCompleted { removed } => format!("Removed {} completed", removed),
        StoreEvent::ClearedAll { removed } => format!("Removed all {} tasks", removed),
        _ => return None,
    };
    Some(message)
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
