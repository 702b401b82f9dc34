use crate::models::member::MemberId;
use crate::models::priority::Priority;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeTask {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub assigned_to: MemberId,
    pub created_by: MemberId,
    pub created_at: i64,
    pub completed_at: Option<i64>, // None = pending
    pub due_date: Option<i64>,
    pub priority: Priority,
}

impl OneTimeTask {
    pub fn is_pending(&self) -> bool {
        self.completed_at.is_none()
    }

    /// Past its due date and still pending.
    pub fn is_overdue(&self, now: i64) -> bool {
        self.is_pending() && self.due_date.is_some_and(|due| due < now)
    }
}
