//! Midnight boundary detection.
//!
//! Completion marks are only meaningful for the calendar day they were made
//! on. The detector compares the day stamped at the last reset with today's
//! local day and reports one of two states:
//!
//! - `SameDay`: the stamped day is today.
//! - `Stale`: the local date has moved past the stamp.
//!
//! `Stale → SameDay` only happens through a forced reset, which also clears
//! every completion record (see `CompletionTracker::force_reset`).

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Date-only value in the local time zone, `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayLabel(NaiveDate);

impl DayLabel {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Local calendar day containing the epoch timestamp.
    pub fn from_epoch(ts: i64) -> AppResult<Self> {
        Ok(Self(date::day_of(ts)?))
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        date::parse_date(s)
            .map(Self)
            .ok_or_else(|| AppError::InvalidDate(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Epoch seconds of the local midnight that starts this day.
    pub fn start_epoch(&self) -> AppResult<i64> {
        date::start_of_day(self.0)
    }

    /// Epoch seconds of the local midnight that ends this day.
    pub fn next_midnight_epoch(&self) -> AppResult<i64> {
        let next = self
            .0
            .succ_opt()
            .ok_or_else(|| AppError::InvalidDate(self.to_string()))?;
        date::start_of_day(next)
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DayLabel {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayLabel {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        DayLabel::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    SameDay,
    Stale,
}

/// Baseline day stamped at the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    baseline: DayLabel,
}

impl DayBoundary {
    pub fn new(baseline: DayLabel) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> DayLabel {
        self.baseline
    }

    pub fn state(&self, today: DayLabel) -> DayState {
        if self.baseline == today {
            DayState::SameDay
        } else {
            DayState::Stale
        }
    }

    pub fn should_reset(&self, today: DayLabel) -> bool {
        self.state(today) == DayState::Stale
    }

    /// Stamp `today` as the new baseline. Callers clear their records first.
    pub fn rebase(&mut self, today: DayLabel) {
        self.baseline = today;
    }
}
