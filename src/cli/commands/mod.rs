pub mod chore;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod init;
pub mod log;
pub mod member;
pub mod plant;
pub mod remind;
pub mod stats;
pub mod task;
pub mod today;

use crate::config::Config;
use crate::core::availability::AvailabilityStore;
use crate::core::tracker::CompletionTracker;
use crate::db::initialize::init_db;
use crate::db::kv::SqliteStore;
use crate::db::members::load_members;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::clock::Clock;

pub(crate) type Tracker<'a> = CompletionTracker<SqliteStore, &'a dyn Clock>;

/// Open the configured database, bringing its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn open_tracker<'a>(cfg: &Config, clock: &'a dyn Clock) -> AppResult<Tracker<'a>> {
    let store = SqliteStore::open(&cfg.database)?;
    Ok(CompletionTracker::new(store, clock).with_policy(cfg.rollback_policy))
}

pub(crate) fn load_availability(pool: &DbPool, cfg: &Config, now: i64) -> AppResult<AvailabilityStore> {
    let members = load_members(&pool.conn)?;
    Ok(AvailabilityStore::from_members(&members, now).with_stale_after(cfg.stale_after_secs()))
}

pub(crate) fn warn_if_stale(availability: &AvailabilityStore, now: i64) {
    if availability.is_stale(now) {
        warning("Availability data may be out of date; assignments are a best guess.");
    }
}
