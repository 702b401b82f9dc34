//! Boundary payloads exchanged with the REST backend.
//!
//! Booleans travel as `0/1` integers, timestamps as epoch seconds and
//! `rotation_order` as JSON text of member ids.

use crate::errors::{AppError, AppResult};
use crate::models::chore::Chore;
use crate::models::member::MemberId;
use crate::models::one_time_task::OneTimeTask;
use crate::models::plant::Plant;
use crate::models::rotation_order::RotationOrder;
use serde::{Deserialize, Serialize};

/// serde adapter: `bool` ⇔ `0/1`.
pub mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(i64::deserialize(d)? != 0)
    }
}

/// Body of `PATCH /persons/setAvailability/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAvailability {
    pub person_id: MemberId,
    #[serde(with = "int_bool")]
    pub is_available: bool,
    #[serde(default)]
    pub unavailable_since: Option<i64>,
    #[serde(default)]
    pub unavailable_until: Option<i64>,
}

impl SetAvailability {
    pub fn validate(&self) -> AppResult<()> {
        if let (Some(since), Some(until)) = (self.unavailable_since, self.unavailable_until)
            && until < since
        {
            return Err(AppError::Validation(
                "unavailable_until must not be earlier than unavailable_since".into(),
            ));
        }
        Ok(())
    }
}

/// Create/update body for a chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChorePayload {
    pub name: String,
    pub interval: i64,
    #[serde(default)]
    pub worker_id: Option<MemberId>,
    #[serde(with = "int_bool", default)]
    pub rotation_enabled: bool,
    #[serde(default)]
    pub rotation_order: Option<String>,
    #[serde(default = "initial_index")]
    pub last_assigned_index: i64,
    #[serde(default)]
    pub last_done: Option<i64>,
}

fn initial_index() -> i64 {
    -1
}

impl ChorePayload {
    pub fn from_chore(chore: &Chore) -> AppResult<Self> {
        let rotation_order = if chore.rotation_enabled {
            Some(chore.rotation_order.to_json()?)
        } else {
            None
        };

        Ok(Self {
            name: chore.name.clone(),
            interval: chore.interval,
            worker_id: if chore.rotation_enabled { None } else { chore.worker_id },
            rotation_enabled: chore.rotation_enabled,
            rotation_order,
            last_assigned_index: chore.last_assigned_index,
            last_done: chore.last_done,
        })
    }

    pub fn into_chore(self, id: i64) -> AppResult<Chore> {
        let chore = Chore {
            id,
            name: self.name,
            interval: self.interval,
            last_done: self.last_done,
            worker_id: self.worker_id,
            rotation_enabled: self.rotation_enabled,
            rotation_order: RotationOrder::from_json(self.rotation_order.as_deref())?,
            last_assigned_index: self.last_assigned_index,
        };
        chore.validate()?;
        Ok(chore)
    }
}

/// Response of `GET /dashboard/{person_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(rename = "duePlants")]
    pub due_plants: Vec<Plant>,
    #[serde(rename = "dueChores")]
    pub due_chores: Vec<Chore>,
    #[serde(rename = "pendingTasks", default)]
    pub pending_tasks: Vec<OneTimeTask>,
}
