//! Seed state shared by the simulator and the front-end it serves.

use crate::types::list::TodoList;
use crate::types::task::Task;
use serde::{Deserialize, Serialize};

/// Initial state `{currentListId, lists, tasks}`.
///
/// The front-end is configured with the same value the store is seeded from,
/// so both start from an identical view of the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_list_id: Option<u64>,
    #[serde(default)]
    pub lists: Vec<TodoList>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl InitialState {
    /// Seed with a single protected list selected as current.
    pub fn with_default_list(id: u64, name: &str) -> Self {
        Self {
            current_list_id: Some(id),
            lists: vec![TodoList {
                id,
                name: Some(name.into()),
                removable: false,
            }],
            tasks: Vec::new(),
        }
    }
}
