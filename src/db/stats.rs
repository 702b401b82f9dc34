use crate::core::availability::AvailabilityStore;
use crate::core::rotation;
use crate::core::status;
use crate::db::completions::load_events;
use crate::db::pool::DbPool;
use crate::db::{chores, plants};
use crate::errors::AppResult;
use crate::models::member::MemberId;
use crate::models::task_type::TaskType;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::date;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use std::fs;

/// Aggregated figures for the statistics view.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub total: usize,
    pub by_type: BTreeMap<&'static str, usize>,
    /// Last seven days, oldest first.
    pub weekly: Vec<(NaiveDate, usize)>,
    pub streak: u32,
    /// Share of recurring tasks not currently due; `None` without tasks.
    pub completion_rate: Option<f64>,
}

/// Completion days (local calendar) for the member, or everyone.
fn completion_days(events: &[i64]) -> AppResult<HashSet<NaiveDate>> {
    let mut days = HashSet::new();
    for ts in events {
        days.insert(date::day_of(*ts)?);
    }
    Ok(days)
}

/// Consecutive days with at least one completion, ending today. A streak that
/// reached yesterday is still alive until today is over.
pub fn current_streak(days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(y) => y,
            None => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

pub fn weekly_trend(timestamps: &[i64], today: NaiveDate) -> AppResult<Vec<(NaiveDate, usize)>> {
    let window = date::last_n_days(today, 7);
    let mut counts: BTreeMap<NaiveDate, usize> = window.iter().map(|d| (*d, 0)).collect();

    for ts in timestamps {
        let day = date::day_of(*ts)?;
        if let Some(c) = counts.get_mut(&day) {
            *c += 1;
        }
    }
    Ok(counts.into_iter().collect())
}

/// Share of the member's plants and chores that are not due right now.
pub fn completion_rate(
    pool: &DbPool,
    member: Option<MemberId>,
    availability: &AvailabilityStore,
    now: i64,
) -> AppResult<Option<f64>> {
    let mut total = 0usize;
    let mut on_track = 0usize;

    for plant in plants::load_plants(&pool.conn)? {
        if member.is_some_and(|m| m != plant.owner_id) {
            continue;
        }
        total += 1;
        if !status::is_due(plant.last_pour, plant.interval, now)? {
            on_track += 1;
        }
    }

    for chore in chores::load_chores(&pool.conn)? {
        if let Some(m) = member
            && rotation::responsible_member(&chore, availability, now)? != m
        {
            continue;
        }
        total += 1;
        if !status::is_due(chore.last_done, chore.interval, now)? {
            on_track += 1;
        }
    }

    if total == 0 {
        return Ok(None);
    }
    Ok(Some(on_track as f64 / total as f64))
}

pub fn gather(
    pool: &DbPool,
    member: Option<MemberId>,
    availability: &AvailabilityStore,
    now: i64,
) -> AppResult<Statistics> {
    let events = load_events(&pool.conn, member)?;
    let timestamps: Vec<i64> = events.iter().map(|e| e.completed_at).collect();
    let today = date::day_of(now)?;

    let mut by_type = BTreeMap::new();
    for t in [TaskType::Chore, TaskType::Plant, TaskType::OneTime] {
        by_type.insert(t.to_db_str(), 0);
    }
    for ev in &events {
        *by_type.entry(ev.task_type.to_db_str()).or_insert(0) += 1;
    }

    Ok(Statistics {
        total: events.len(),
        by_type,
        weekly: weekly_trend(&timestamps, today)?,
        streak: current_streak(&completion_days(&timestamps)?, today),
        completion_rate: completion_rate(pool, member, availability, now)?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    for (label, table) in [
        ("Members", "person"),
        ("Chores", "chore"),
        ("Plants", "plant"),
        ("One-time tasks", "one_time_task"),
        ("Completions", "completions"),
    ] {
        let count: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    println!();
    Ok(())
}
