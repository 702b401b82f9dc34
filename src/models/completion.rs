use crate::models::member::MemberId;
use crate::models::task_type::TaskType;
use serde::{Deserialize, Serialize};

/// Lifecycle of an optimistic completion mark.
///
/// `Pending` until the database write returns, then `Confirmed` or `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionState {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

/// Device-local record that a task was completed today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub completed_at: i64, // epoch seconds
    #[serde(default)]
    pub state: CompletionState,
}

impl CompletionRecord {
    pub fn matches(&self, id: i64, task_type: TaskType) -> bool {
        self.id == id && self.task_type == task_type
    }

    /// Failed marks stay visible under `KeepFailed` but never count as done.
    pub fn counts_as_done(&self) -> bool {
        self.state != CompletionState::Failed
    }
}

/// Persisted completion history row (`completions` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionEvent {
    pub id: i64,
    pub task_id: i64,
    pub task_type: TaskType,
    pub task_name: String,
    pub member_id: MemberId,
    pub completed_at: i64,
    pub rotation: bool,
}
