//! Calendar helpers: everything here works in the local time zone and on
//! epoch seconds, the unit used by every stored timestamp.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub const SECS_PER_DAY: i64 = 86_400;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` or a bare date (midnight).
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// Local wall-clock time for an epoch timestamp.
pub fn local_from_epoch(ts: i64) -> AppResult<DateTime<Local>> {
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or(AppError::InvalidTimestamp(ts))
}

/// Local calendar date of an epoch timestamp.
pub fn day_of(ts: i64) -> AppResult<NaiveDate> {
    Ok(local_from_epoch(ts)?.date_naive())
}

/// Epoch seconds of a local wall-clock time. During a DST gap the earliest
/// valid instant after it is used.
pub fn epoch_of(dt: NaiveDateTime) -> AppResult<i64> {
    let resolved = Local
        .from_local_datetime(&dt)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(dt + chrono::Duration::hours(1)))
                .earliest()
        })
        .ok_or_else(|| AppError::InvalidDate(dt.to_string()))?;
    Ok(resolved.timestamp())
}

/// Epoch seconds of local midnight starting `date`.
pub fn start_of_day(date: NaiveDate) -> AppResult<i64> {
    epoch_of(date.and_time(NaiveTime::MIN))
}

/// Parse a CLI date/datetime into epoch seconds.
pub fn parse_epoch(s: &str) -> AppResult<i64> {
    let dt = parse_datetime(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
    epoch_of(dt)
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The `n` calendar days ending with `last`, oldest first.
pub fn last_n_days(last: NaiveDate, n: u32) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(n as usize);
    let mut d = last;
    for _ in 0..n {
        out.push(d);
        match d.pred_opt() {
            Some(prev) => d = prev,
            None => break,
        }
    }
    out.reverse();
    out
}
