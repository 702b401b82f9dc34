use crate::errors::{AppError, AppResult};
use crate::models::member::MemberId;
use crate::models::rotation_order::RotationOrder;
use serde::{Deserialize, Serialize};

/// A recurring chore, owned either by a single worker or by a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub id: i64,
    pub name: String,
    pub interval: i64,                // days, >= 1
    pub last_done: Option<i64>,       // epoch seconds, None = never done
    pub worker_id: Option<MemberId>,  // single-assignee mode
    pub rotation_enabled: bool,
    pub rotation_order: RotationOrder,
    pub last_assigned_index: i64,     // -1 before the first completion
}

impl Chore {
    /// Chore handled by one fixed member.
    pub fn single(name: &str, interval: i64, worker_id: MemberId) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            interval,
            last_done: None,
            worker_id: Some(worker_id),
            rotation_enabled: false,
            rotation_order: RotationOrder::default(),
            last_assigned_index: -1,
        }
    }

    /// Chore cycling through `order`; the first completion is credited to `order[0]`.
    pub fn rotating(name: &str, interval: i64, order: RotationOrder) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            interval,
            last_done: None,
            worker_id: None,
            rotation_enabled: true,
            rotation_order: order,
            last_assigned_index: -1,
        }
    }

    /// Rotation decides the responsible member whenever it is enabled,
    /// regardless of a leftover `worker_id`.
    pub fn uses_rotation(&self) -> bool {
        self.rotation_enabled
    }

    /// Fails with `InvalidState` when the chore has no responsible party.
    pub fn ensure_assignable(&self) -> AppResult<()> {
        if self.rotation_enabled && self.rotation_order.is_empty() {
            return Err(AppError::InvalidState(format!(
                "chore '{}' has rotation enabled but an empty rotation order",
                self.name
            )));
        }
        if !self.rotation_enabled && self.worker_id.is_none() {
            return Err(AppError::InvalidState(format!(
                "chore '{}' has neither a worker nor a rotation",
                self.name
            )));
        }
        Ok(())
    }

    /// Full validation applied before a chore is written.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("chore name must not be empty".into()));
        }
        if self.interval < 1 {
            return Err(AppError::Validation(
                "interval must be a positive integer (>= 1)".into(),
            ));
        }
        if let Some(dup) = self.rotation_order.first_duplicate() {
            return Err(AppError::InvalidRotation(format!(
                "member {} appears more than once",
                dup
            )));
        }
        self.ensure_assignable()
    }
}
