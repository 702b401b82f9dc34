//! Snapshot of who can take on work right now.

use crate::errors::AppResult;
use crate::models::member::{FamilyMember, MemberId};
use crate::models::wire::SetAvailability;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub is_available: bool,
    pub unavailable_since: Option<i64>,
    pub unavailable_until: Option<i64>,
}

impl Availability {
    pub fn available() -> Self {
        Self {
            is_available: true,
            unavailable_since: None,
            unavailable_until: None,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            is_available: false,
            ..Self::available()
        }
    }

    /// Available but away during `[since, until]`.
    pub fn away(since: i64, until: i64) -> Self {
        Self {
            is_available: true,
            unavailable_since: Some(since),
            unavailable_until: Some(until),
        }
    }

    pub fn of(member: &FamilyMember) -> Self {
        Self {
            is_available: member.is_available,
            unavailable_since: member.unavailable_since,
            unavailable_until: member.unavailable_until,
        }
    }

    /// The flag must be set and `now` must lie outside the window
    /// (the window only counts when both ends are set; both ends inclusive).
    pub fn is_available_at(&self, now: i64) -> bool {
        if !self.is_available {
            return false;
        }
        match (self.unavailable_since, self.unavailable_until) {
            (Some(since), Some(until)) => !(since <= now && now <= until),
            _ => true,
        }
    }
}

/// Availability of every known member, as of `fetched_at`.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityStore {
    entries: HashMap<MemberId, Availability>,
    fetched_at: i64,
    stale_after: Option<i64>,
}

impl AvailabilityStore {
    pub fn new(fetched_at: i64) -> Self {
        Self {
            entries: HashMap::new(),
            fetched_at,
            stale_after: None,
        }
    }

    pub fn from_members(members: &[FamilyMember], fetched_at: i64) -> Self {
        let mut store = Self::new(fetched_at);
        for m in members {
            store.insert(m.id, Availability::of(m));
        }
        store
    }

    /// Snapshots older than `secs` are flagged stale (advisory only).
    pub fn with_stale_after(mut self, secs: i64) -> Self {
        self.stale_after = Some(secs);
        self
    }

    pub fn insert(&mut self, member_id: MemberId, availability: Availability) {
        self.entries.insert(member_id, availability);
    }

    pub fn get(&self, member_id: MemberId) -> Option<&Availability> {
        self.entries.get(&member_id)
    }

    pub fn contains(&self, member_id: MemberId) -> bool {
        self.entries.contains_key(&member_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fetched_at(&self) -> i64 {
        self.fetched_at
    }

    /// Unknown members are never available.
    pub fn is_available(&self, member_id: MemberId, now: i64) -> bool {
        self.entries
            .get(&member_id)
            .is_some_and(|a| a.is_available_at(now))
    }

    pub fn is_stale(&self, now: i64) -> bool {
        self.stale_after
            .is_some_and(|limit| now - self.fetched_at > limit)
    }

    /// Take over the result of a successful "set availability" call.
    pub fn apply(&mut self, update: &SetAvailability) -> AppResult<()> {
        update.validate()?;
        self.entries.insert(
            update.person_id,
            Availability {
                is_available: update.is_available,
                unavailable_since: update.unavailable_since,
                unavailable_until: update.unavailable_until,
            },
        );
        Ok(())
    }
}
