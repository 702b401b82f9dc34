//! Optimistic, device-local "completed today" tracking.
//!
//! A completion is marked locally as soon as the user acts, before the
//! database write returns. Each record then moves through
//! `Pending → Confirmed` or `Pending → Failed`; on failure the configured
//! [`RollbackPolicy`] decides whether the mark is dropped or kept as failed.
//!
//! All records live in one JSON document under [`STORAGE_KEY`], stamped with
//! the day of the last reset. Storage problems never propagate: a broken or
//! unreadable document reads as "no record" and a failed write only prints a
//! warning, so a completion can always reach the database.

use crate::core::day_boundary::{DayBoundary, DayLabel};
use crate::core::storage::KeyValueStore;
use crate::models::completion::{CompletionRecord, CompletionState};
use crate::models::task_type::TaskType;
use crate::ui::messages::warning;
use crate::utils::clock::Clock;
use crate::utils::date;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const STORAGE_KEY: &str = "task_completions";

/// What happens to an optimistic mark whose database write failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackPolicy {
    /// Drop the mark; the task shows as not done again.
    #[default]
    Revert,
    /// Keep the mark with state `Failed` (shown, never counted as done).
    KeepFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CompletionSnapshot {
    completions: Vec<CompletionRecord>,
    last_reset: DayLabel,
}

impl CompletionSnapshot {
    fn empty(today: DayLabel) -> Self {
        Self {
            completions: Vec::new(),
            last_reset: today,
        }
    }

    fn find(&self, id: i64, task_type: TaskType) -> Option<&CompletionRecord> {
        self.completions.iter().find(|c| c.matches(id, task_type))
    }

    fn find_mut(&mut self, id: i64, task_type: TaskType) -> Option<&mut CompletionRecord> {
        self.completions.iter_mut().find(|c| c.matches(id, task_type))
    }

    fn remove(&mut self, id: i64, task_type: TaskType) {
        self.completions.retain(|c| !c.matches(id, task_type));
    }
}

/// Authoritative completion state of one task, as returned by a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerCompletion {
    pub id: i64,
    pub task_type: TaskType,
    /// `last_done` / `last_pour` / `completed_at` as stored by the backend.
    pub completed_at: Option<i64>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub confirmed: usize,
    pub removed: usize,
}

pub struct CompletionTracker<S, C> {
    store: S,
    clock: C,
    policy: RollbackPolicy,
}

impl<S: KeyValueStore, C: Clock> CompletionTracker<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            policy: RollbackPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RollbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn today(&self) -> DayLabel {
        self.clock
            .today()
            .unwrap_or_else(|_| DayLabel::new(date::today()))
    }

    /// Raw stored document; unreadable state counts as absent.
    fn read_stored(&self) -> Option<CompletionSnapshot> {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warning(format!("Error loading completions: {}", e));
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warning(format!("Ignoring unreadable completion state: {}", e));
                None
            }
        }
    }

    /// Today's records. A document stamped with another day reads as empty.
    fn load(&self) -> CompletionSnapshot {
        let today = self.today();
        match self.read_stored() {
            Some(snapshot) if !DayBoundary::new(snapshot.last_reset).should_reset(today) => {
                snapshot
            }
            _ => CompletionSnapshot::empty(today),
        }
    }

    /// Load for mutation: a stale document is reset before anything is written.
    fn load_for_update(&mut self) -> CompletionSnapshot {
        if self.should_reset() {
            self.force_reset();
        }
        self.load()
    }

    fn save(&mut self, snapshot: &CompletionSnapshot) {
        let result = serde_json::to_string(snapshot)
            .map_err(Into::into)
            .and_then(|json| self.store.set(STORAGE_KEY, &json));

        if let Err(e) = result {
            warning(format!("Error saving completions: {}", e));
        }
    }

    /// Record `task` as completed at `timestamp`; replaces an earlier mark.
    pub fn mark_completed(&mut self, id: i64, task_type: TaskType, timestamp: i64) {
        let mut snapshot = self.load_for_update();
        snapshot.remove(id, task_type);
        snapshot.completions.push(CompletionRecord {
            id,
            task_type,
            completed_at: timestamp,
            state: CompletionState::Pending,
        });
        self.save(&snapshot);
    }

    pub fn record(&self, id: i64, task_type: TaskType) -> Option<CompletionRecord> {
        self.load().find(id, task_type).cloned()
    }

    pub fn is_completed_today(&self, id: i64, task_type: TaskType) -> bool {
        let today = self.today();
        self.record(id, task_type).is_some_and(|r| {
            r.counts_as_done() && DayLabel::from_epoch(r.completed_at).ok() == Some(today)
        })
    }

    /// Timestamp of today's mark, if any.
    pub fn completion_time(&self, id: i64, task_type: TaskType) -> Option<i64> {
        let today = self.today();
        self.record(id, task_type)
            .filter(|r| {
                r.counts_as_done() && DayLabel::from_epoch(r.completed_at).ok() == Some(today)
            })
            .map(|r| r.completed_at)
    }

    pub fn today_completions(&self) -> Vec<CompletionRecord> {
        self.load().completions
    }

    /// The database write succeeded.
    pub fn confirm(&mut self, id: i64, task_type: TaskType) -> bool {
        let mut snapshot = self.load_for_update();
        let Some(record) = snapshot.find_mut(id, task_type) else {
            return false;
        };
        record.state = CompletionState::Confirmed;
        self.save(&snapshot);
        true
    }

    /// The database write failed; applies the rollback policy.
    pub fn fail(&mut self, id: i64, task_type: TaskType) -> bool {
        let mut snapshot = self.load_for_update();
        if snapshot.find(id, task_type).is_none() {
            return false;
        }

        match self.policy {
            RollbackPolicy::Revert => snapshot.remove(id, task_type),
            RollbackPolicy::KeepFailed => {
                if let Some(record) = snapshot.find_mut(id, task_type) {
                    record.state = CompletionState::Failed;
                }
            }
        }
        self.save(&snapshot);
        true
    }

    /// Align local marks with freshly fetched server state.
    ///
    /// Server state wins: a task the server reports as done today becomes a
    /// confirmed mark with the server's timestamp; confirmed or failed marks
    /// the server does not know about are dropped. Pending marks for tasks
    /// the server reports as not done are kept (their write is in flight).
    pub fn reconcile(&mut self, server: &[ServerCompletion]) -> ReconcileReport {
        let today = self.today();
        let mut snapshot = self.load_for_update();
        let mut report = ReconcileReport::default();

        for item in server {
            let done_today = item
                .completed_at
                .and_then(|ts| DayLabel::from_epoch(ts).ok())
                .is_some_and(|day| day == today);

            if done_today {
                let ts = item.completed_at.unwrap_or_default();
                match snapshot.find_mut(item.id, item.task_type) {
                    Some(r) if r.state == CompletionState::Confirmed && r.completed_at == ts => {}
                    Some(r) => {
                        r.state = CompletionState::Confirmed;
                        r.completed_at = ts;
                        report.confirmed += 1;
                    }
                    None => {
                        snapshot.completions.push(CompletionRecord {
                            id: item.id,
                            task_type: item.task_type,
                            completed_at: ts,
                            state: CompletionState::Confirmed,
                        });
                        report.confirmed += 1;
                    }
                }
            } else if snapshot
                .find(item.id, item.task_type)
                .is_some_and(|r| r.state != CompletionState::Pending)
            {
                snapshot.remove(item.id, item.task_type);
                report.removed += 1;
            }
        }

        // settled marks for tasks the server no longer lists
        let known: HashSet<(i64, TaskType)> = server.iter().map(|s| (s.id, s.task_type)).collect();
        let before = snapshot.completions.len();
        snapshot
            .completions
            .retain(|r| r.state == CompletionState::Pending || known.contains(&(r.id, r.task_type)));
        report.removed += before - snapshot.completions.len();

        self.save(&snapshot);
        report
    }

    /// Drop all local state, including the reset stamp.
    pub fn clear_all(&mut self) {
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            warning(format!("Error clearing completions: {}", e));
        }
    }

    /// True when stored state belongs to an earlier (or later) day.
    /// Nothing stored yet means there is nothing to reset.
    pub fn should_reset(&self) -> bool {
        self.read_stored()
            .is_some_and(|s| DayBoundary::new(s.last_reset).should_reset(self.today()))
    }

    /// Clear every record and stamp today as the new baseline.
    pub fn force_reset(&mut self) {
        let snapshot = CompletionSnapshot::empty(self.today());
        self.save(&snapshot);
    }

    /// Periodic check: resets when the day has changed. Returns whether it did.
    pub fn check_and_reset(&mut self) -> bool {
        if self.should_reset() {
            self.force_reset();
            true
        } else {
            false
        }
    }

    /// Day stamped at the last reset, if any state is stored.
    pub fn last_reset(&self) -> Option<DayLabel> {
        self.read_stored().map(|s| s.last_reset)
    }

    /// Seconds left until the next local midnight.
    pub fn seconds_until_midnight(&self) -> i64 {
        let now = self.clock.now();
        self.today()
            .next_midnight_epoch()
            .map(|midnight| (midnight - now).max(0))
            .unwrap_or(0)
    }
}
