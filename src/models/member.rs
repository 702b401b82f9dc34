use crate::models::wire::int_bool;
use serde::{Deserialize, Serialize};

pub type MemberId = i64;

/// A family member. Chores, plants and tasks reference members by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: MemberId,
    pub name: String,
    pub role: String,
    #[serde(with = "int_bool")]
    pub is_available: bool, // ⇔ person.is_available (0/1)
    pub unavailable_since: Option<i64>, // epoch seconds
    pub unavailable_until: Option<i64>, // epoch seconds
}

impl FamilyMember {
    /// New member, available and without an unavailability window.
    pub fn new(id: MemberId, name: &str, role: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            role: role.trim().to_string(),
            is_available: true,
            unavailable_since: None,
            unavailable_until: None,
        }
    }

    /// The unavailability window, only when both ends are set.
    pub fn window(&self) -> Option<(i64, i64)> {
        match (self.unavailable_since, self.unavailable_until) {
            (Some(since), Some(until)) => Some((since, until)),
            _ => None,
        }
    }
}
