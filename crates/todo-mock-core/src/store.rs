//! In-memory collection store for lists and tasks.
//!
//! [`CollectionStore`] holds the authoritative state of one simulated backend.
//! It is seeded from an [`InitialState`] and only mutated through the operations
//! below, which the endpoint handlers call for each request.

use crate::allocator::{next_id, IdsExhausted};
use crate::types::list::TodoList;
use crate::types::state::InitialState;
use crate::types::task::{Task, TaskPatch};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Clock backed by `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Authoritative lists and tasks of one simulated backend.
pub struct CollectionStore {
    current_list_id: Option<u64>,
    lists: Vec<TodoList>,
    tasks: Vec<Task>,
    clock: Arc<dyn Clock>,
    /// Most recent `touched` value handed out or seeded
    last_stamp: i64,
}

impl CollectionStore {
    /// Create a store seeded from `seed`, stamping tasks with the system clock.
    pub fn new(seed: InitialState) -> Self {
        Self::with_clock(seed, Arc::new(SystemClock))
    }

    /// Create a store seeded from `seed` with a custom clock.
    pub fn with_clock(seed: InitialState, clock: Arc<dyn Clock>) -> Self {
        warn_on_duplicate_ids("list", seed.lists.iter().map(|l| l.id));
        warn_on_duplicate_ids("task", seed.tasks.iter().map(|t| t.id));

        let last_stamp = seed.tasks.iter().map(|t| t.touched).max().unwrap_or(i64::MIN);

        Self {
            current_list_id: seed.current_list_id,
            lists: seed.lists,
            tasks: seed.tasks,
            clock,
            last_stamp,
        }
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn list(&self, id: u64) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks whose `listId` equals `list_id`, including orphans of deleted lists.
    pub fn tasks_of_list(&self, list_id: u64) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.list_id == list_id)
    }

    /// Append a removable list. Duplicate names are accepted.
    pub fn create_list(&mut self, name: Option<Value>) -> Result<TodoList, IdsExhausted> {
        let list = TodoList {
            id: next_id(&self.lists)?,
            name,
            removable: true,
        };
        self.lists.push(list.clone());
        Ok(list)
    }

    /// Remove the list with `id`, returning it if it existed.
    ///
    /// The `removable` flag is not consulted and tasks of the list are kept.
    pub fn delete_list(&mut self, id: u64) -> Option<TodoList> {
        let index = self.lists.iter().position(|l| l.id == id)?;
        Some(self.lists.remove(index))
    }

    /// Append an incomplete task to `list_id`. The list is not required to exist.
    pub fn create_task(&mut self, list_id: u64, text: Option<Value>) -> Result<Task, IdsExhausted> {
        let task = Task {
            id: next_id(&self.tasks)?,
            list_id,
            text,
            completed: false,
            touched: self.stamp(),
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Set `completed` on the task with `id` and refresh its `touched` stamp.
    ///
    /// `None` keeps the stored flag. An unknown id leaves the store untouched and
    /// echoes a patch without `listId`.
    pub fn update_task(&mut self, id: u64, completed: Option<bool>) -> TaskPatch {
        let touched = self.stamp();

        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                if let Some(completed) = completed {
                    task.completed = completed;
                }
                task.touched = touched;
                TaskPatch::from(&*task)
            }
            None => TaskPatch {
                id,
                list_id: None,
                completed: completed.unwrap_or(false),
                touched,
            },
        }
    }

    /// Remove the task with `id`, returning it if it existed.
    pub fn delete_task(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Copy of the current state in the shape the front-end is seeded with.
    pub fn snapshot(&self) -> InitialState {
        InitialState {
            current_list_id: self.current_list_id,
            lists: self.lists.clone(),
            tasks: self.tasks.clone(),
        }
    }

    /// Next `touched` value; strictly greater than any previous one in this store.
    fn stamp(&mut self) -> i64 {
        let now = self.clock.now_millis();
        let stamp = now.max(self.last_stamp.saturating_add(1));
        self.last_stamp = stamp;
        stamp
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new(InitialState::default())
    }
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("current_list_id", &self.current_list_id)
            .field("lists", &self.lists)
            .field("tasks", &self.tasks)
            .field("last_stamp", &self.last_stamp)
            .finish_non_exhaustive()
    }
}

fn warn_on_duplicate_ids(kind: &str, ids: impl Iterator<Item = u64>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            tracing::warn!(kind, id, "seed state contains a duplicate id");
        }
    }
}
