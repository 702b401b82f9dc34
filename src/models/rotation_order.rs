//! Ordered list of member ids a rotating chore cycles through.
//!
//! Order is meaningful: `[2,5,1]` and `[1,2,5]` are different rotations.
//! In the database and on the wire the order travels as JSON text (`"[2,5,1]"`).

use crate::errors::{AppError, AppResult};
use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationOrder(Vec<MemberId>);

impl RotationOrder {
    pub fn new(ids: Vec<MemberId>) -> Self {
        Self(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<MemberId> {
        self.0.get(position).copied()
    }

    pub fn position_of(&self, member_id: MemberId) -> Option<usize> {
        self.0.iter().position(|id| *id == member_id)
    }

    pub fn contains(&self, member_id: MemberId) -> bool {
        self.0.contains(&member_id)
    }

    pub fn as_slice(&self) -> &[MemberId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberId> {
        self.0.iter()
    }

    /// First id appearing more than once, if any.
    pub fn first_duplicate(&self) -> Option<MemberId> {
        let mut seen = HashSet::new();
        self.0.iter().copied().find(|id| !seen.insert(*id))
    }

    /// Serialize as JSON text for the `rotation_order` column.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Parse the `rotation_order` column. NULL / blank text means "no rotation".
    pub fn from_json(text: Option<&str>) -> AppResult<Self> {
        match text.map(str::trim) {
            None | Some("") | Some("null") => Ok(Self::default()),
            Some(t) => {
                let ids: Vec<MemberId> = serde_json::from_str(t)
                    .map_err(|e| AppError::InvalidRotation(format!("'{}': {}", t, e)))?;
                Ok(Self(ids))
            }
        }
    }

    /// Parse a CLI list such as `2,5,1`.
    pub fn parse_list(input: &str) -> AppResult<Self> {
        let mut ids = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part
                .parse::<MemberId>()
                .map_err(|_| AppError::InvalidRotation(format!("'{}' is not a member id", part)))?;
            ids.push(id);
        }
        Ok(Self(ids))
    }
}

impl From<Vec<MemberId>> for RotationOrder {
    fn from(ids: Vec<MemberId>) -> Self {
        Self(ids)
    }
}
