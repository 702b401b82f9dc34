//! Rotation assignment for shared chores.
//!
//! `last_assigned_index` points at the member credited with the last
//! completion. The next responsible member is found by walking the rotation
//! order from the slot after it, skipping members who are unavailable. When
//! nobody is available the member in that first slot is returned anyway, so
//! a chore never ends up without an assignee.

use crate::core::availability::AvailabilityStore;
use crate::errors::{AppError, AppResult};
use crate::models::chore::Chore;
use crate::models::member::MemberId;

/// Outcome of a rotation walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub member_id: MemberId,
    /// Position of `member_id` in the rotation order.
    pub position: usize,
    /// Nobody was available; `member_id` is the start slot.
    pub fallback: bool,
    /// Members passed over because they were unavailable, in walk order.
    pub skipped: Vec<MemberId>,
    /// Availability snapshot older than its threshold; treat as advisory.
    pub stale: bool,
}

/// A chore after a completion, plus who got the credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedChore {
    pub chore: Chore,
    pub credited: MemberId,
}

fn require_rotation(chore: &Chore) -> AppResult<()> {
    if !chore.rotation_enabled {
        return Err(AppError::InvalidState(format!(
            "chore '{}' does not rotate",
            chore.name
        )));
    }
    chore.ensure_assignable()
}

/// Slot the walk starts from: `(last_assigned_index + 1) mod len`.
/// The index is reduced first, so any stored value is accepted.
pub fn start_position(last_assigned_index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    ((last_assigned_index.rem_euclid(len) + 1) % len) as usize
}

/// Walk the rotation and report who is responsible at `now`.
pub fn resolve(chore: &Chore, availability: &AvailabilityStore, now: i64) -> AppResult<Assignment> {
    require_rotation(chore)?;

    let order = &chore.rotation_order;
    let len = order.len();
    let start = start_position(chore.last_assigned_index, len);
    let mut skipped = Vec::new();

    for step in 0..len {
        let position = (start + step) % len;
        let Some(member_id) = order.get(position) else {
            continue;
        };
        if availability.is_available(member_id, now) {
            return Ok(Assignment {
                member_id,
                position,
                fallback: false,
                skipped,
                stale: availability.is_stale(now),
            });
        }
        skipped.push(member_id);
    }

    let member_id = order
        .get(start)
        .ok_or_else(|| AppError::InvalidState(format!("chore '{}': empty rotation", chore.name)))?;

    Ok(Assignment {
        member_id,
        position: start,
        fallback: true,
        skipped,
        stale: availability.is_stale(now),
    })
}

/// Member currently responsible for a rotating chore.
pub fn current_assignee(
    chore: &Chore,
    availability: &AvailabilityStore,
    now: i64,
) -> AppResult<MemberId> {
    Ok(resolve(chore, availability, now)?.member_id)
}

/// Responsible member for any chore: the rotation when enabled, the fixed
/// worker otherwise.
pub fn responsible_member(
    chore: &Chore,
    availability: &AvailabilityStore,
    now: i64,
) -> AppResult<MemberId> {
    chore.ensure_assignable()?;
    if chore.uses_rotation() {
        return current_assignee(chore, availability, now);
    }
    chore
        .worker_id
        .ok_or_else(|| AppError::InvalidState(format!("chore '{}' has no worker", chore.name)))
}

/// Apply one completion: credit the responsible member, move the rotation
/// pointer to their slot and set `last_done`, all in the returned value.
pub fn advance_with_credit(
    chore: &Chore,
    availability: &AvailabilityStore,
    completed_at: i64,
) -> AppResult<AdvancedChore> {
    chore.ensure_assignable()?;

    let mut updated = chore.clone();
    let credited = if chore.uses_rotation() {
        let assignment = resolve(chore, availability, completed_at)?;
        updated.last_assigned_index = assignment.position as i64;
        assignment.member_id
    } else {
        responsible_member(chore, availability, completed_at)?
    };
    updated.last_done = Some(completed_at);

    Ok(AdvancedChore {
        chore: updated,
        credited,
    })
}

/// Chore state after a completion at `completed_at`.
pub fn advance_rotation(
    chore: &Chore,
    availability: &AvailabilityStore,
    completed_at: i64,
) -> AppResult<Chore> {
    Ok(advance_with_credit(chore, availability, completed_at)?.chore)
}
