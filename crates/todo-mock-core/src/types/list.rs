//! To-do list types.

use crate::allocator::Identified;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named grouping of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier among lists
    pub id: u64,
    /// Display name as sent by the client (duplicates are allowed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// `false` marks the protected default list
    pub removable: bool,
}

impl Identified for TodoList {
    fn id(&self) -> u64 {
        self.id
    }
}
