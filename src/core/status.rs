//! Due dates, urgency and human-readable status lines for task cards.
//!
//! Everything is computed on local calendar days: a chore with a 1-day
//! interval done at 23:58 is due again at 00:00, not at 23:58 the next day.

use crate::errors::AppResult;
use crate::models::one_time_task::OneTimeTask;
use crate::models::priority::Priority;
use crate::utils::date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "Urgent",
        }
    }
}

impl From<Priority> for Urgency {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Low => Urgency::Low,
            Priority::Medium => Urgency::Medium,
            Priority::High => Urgency::High,
        }
    }
}

/// Days-since limits: strictly above `high` is urgent, above `medium` is medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    pub high: i64,
    pub medium: i64,
}

impl UrgencyThresholds {
    pub const CHORE: Self = Self { high: 3, medium: 1 };
    pub const PLANT: Self = Self { high: 5, medium: 2 };
}

/// Calendar days since `last`; `None` when never done. Future timestamps
/// count as today.
pub fn days_since(last: Option<i64>, now: i64) -> AppResult<Option<i64>> {
    let Some(ts) = last else {
        return Ok(None);
    };
    let days = date::days_between(date::day_of(ts)?, date::day_of(now)?);
    Ok(Some(days.max(0)))
}

pub fn urgency(days_since: Option<i64>, thresholds: UrgencyThresholds) -> Urgency {
    match days_since {
        None => Urgency::Low,
        Some(d) if d > thresholds.high => Urgency::High,
        Some(d) if d > thresholds.medium => Urgency::Medium,
        Some(_) => Urgency::Low,
    }
}

/// First day the task is due again; `None` when it was never done.
pub fn next_due_day(last: Option<i64>, interval_days: i64) -> AppResult<Option<NaiveDate>> {
    let Some(ts) = last else {
        return Ok(None);
    };
    let done = date::day_of(ts)?;
    Ok(done.checked_add_days(chrono::Days::new(interval_days.max(0) as u64)))
}

/// Never done, or `day(last) + interval <= today`.
pub fn is_due(last: Option<i64>, interval_days: i64, now: i64) -> AppResult<bool> {
    match next_due_day(last, interval_days)? {
        None => Ok(last.is_none()),
        Some(due) => Ok(due <= date::day_of(now)?),
    }
}

/// Overdue tasks are urgent whatever their priority.
pub fn one_time_urgency(task: &OneTimeTask, now: i64) -> Urgency {
    if task.is_overdue(now) {
        Urgency::High
    } else {
        task.priority.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionVerb {
    Done,
    Watered,
}

impl ActionVerb {
    fn word(&self) -> &'static str {
        match self {
            ActionVerb::Done => "done",
            ActionVerb::Watered => "watered",
        }
    }
}

/// "Never done", "Done today", "Done yesterday", "Done 4 days ago".
pub fn last_action_text(days_since: Option<i64>, verb: ActionVerb) -> String {
    let w = verb.word();
    match days_since {
        None => format!("Never {}", w),
        Some(0) => format!("{} today", capitalize(w)),
        Some(1) => format!("{} yesterday", capitalize(w)),
        Some(n) => format!("{} {} days ago", capitalize(w), n),
    }
}

/// Due line of a one-time task card.
pub fn due_text(task: &OneTimeTask, now: i64) -> AppResult<String> {
    let Some(due) = task.due_date else {
        return Ok("One-off task".to_string());
    };

    let due_day = date::day_of(due)?;
    let today = date::day_of(now)?;
    let diff = date::days_between(today, due_day);

    Ok(match diff {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d if d <= 7 => format!("In {} days", d),
        _ => due_day.format("%d %B").to_string(),
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
