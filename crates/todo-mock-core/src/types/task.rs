//! Task types and the partial shape returned by task updates.

use crate::allocator::Identified;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An item belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier among tasks
    pub id: u64,
    /// Owning list id (not checked against existing lists)
    pub list_id: u64,
    /// Task text as sent by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Last-touched timestamp, milliseconds since the Unix epoch
    #[serde(default)]
    pub touched: i64,
}

impl Identified for Task {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Body returned by a task update.
///
/// Never carries `text`: callers must not expect it to round-trip through an update.
/// `list_id` is absent when the updated id did not match any stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u64>,
    pub completed: bool,
    pub touched: i64,
}

impl From<&Task> for TaskPatch {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            list_id: Some(task.list_id),
            completed: task.completed,
            touched: task.touched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample_task() -> Task {
        Task {
            id: 0,
            list_id: 1,
            text: Some("test".into()),
            completed: false,
            touched: 1_700_000_000_000,
        }
    }

    #[rstest]
    fn test_task_uses_camel_case_fields() {
        let value = serde_json::to_value(sample_task()).expect("Should serialize");
        assert_eq!(
            value,
            json!({
                "id": 0,
                "listId": 1,
                "text": "test",
                "completed": false,
                "touched": 1_700_000_000_000_i64
            })
        );
    }

    #[rstest]
    fn test_task_patch_has_no_text() {
        let patch = TaskPatch::from(&sample_task());
        let value = serde_json::to_value(&patch).expect("Should serialize");
        let object = value.as_object().expect("Should be an object");

        assert!(!object.contains_key("text"));
        assert_eq!(object.len(), 4);
        assert_eq!(value["listId"], 1);
    }

    #[rstest]
    #[case(r#"{"id": 4, "listId": 2}"#, None, false, 0)]
    #[case(r#"{"id": 4, "listId": 2, "text": "milk", "completed": true, "touched": 9}"#, Some("milk"), true, 9)]
    fn test_task_seed_defaults(
        #[case] input: &str,
        #[case] text: Option<&str>,
        #[case] completed: bool,
        #[case] touched: i64,
    ) {
        let task: Task = serde_json::from_str(input).expect("Should deserialize");
        assert_eq!(task.text.as_ref().and_then(Value::as_str), text);
        assert_eq!(task.completed, completed);
        assert_eq!(task.touched, touched);
    }
}
