mod common;
use chrono::NaiveDate;
use common::at;
use rchoreboard::core::availability::AvailabilityStore;
use rchoreboard::core::complete::CompleteLogic;
use rchoreboard::core::storage::{KeyValueStore, MemoryStore};
use rchoreboard::core::tracker::{CompletionTracker, RollbackPolicy};
use rchoreboard::db::completions::{insert_event, load_events, load_events_between};
use rchoreboard::db::kv::SqliteStore;
use rchoreboard::db::log::load_log;
use rchoreboard::db::migrate::{applied_versions, run_pending_migrations};
use rchoreboard::db::pool::DbPool;
use rchoreboard::db::{chores, members, plants, stats, tasks};
use rchoreboard::errors::AppError;
use rchoreboard::models::chore::Chore;
use rchoreboard::models::completion::{CompletionEvent, CompletionState};
use rchoreboard::models::member::FamilyMember;
use rchoreboard::models::one_time_task::OneTimeTask;
use rchoreboard::models::plant::Plant;
use rchoreboard::models::priority::Priority;
use rchoreboard::models::rotation_order::RotationOrder;
use rchoreboard::models::task_type::TaskType;
use rchoreboard::models::wire::SetAvailability;
use rchoreboard::utils::clock::FixedClock;
use rusqlite::Connection;
use std::collections::HashSet;

/// In-memory DB with Anna (1), Ben (2), Clara (3).
fn household() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    for name in ["Anna", "Ben", "Clara"] {
        members::insert_member(&pool.conn, &FamilyMember::new(0, name, "member")).unwrap();
    }
    pool
}

fn snapshot(pool: &DbPool, now: i64) -> AvailabilityStore {
    AvailabilityStore::from_members(&members::load_members(&pool.conn).unwrap(), now)
}

fn event(task_type: TaskType, member_id: i64, completed_at: i64) -> CompletionEvent {
    CompletionEvent {
        id: 0,
        task_id: 1,
        task_type,
        task_name: "x".into(),
        member_id,
        completed_at,
        rotation: false,
    }
}

#[test]
fn migrations_are_recorded_and_idempotent() {
    let pool = DbPool::in_memory().unwrap();
    let first = applied_versions(&pool.conn).unwrap();
    assert_eq!(first.len(), 5);

    run_pending_migrations(&pool.conn).unwrap();
    assert_eq!(applied_versions(&pool.conn).unwrap(), first);
}

#[test]
fn member_availability_round_trip() {
    let pool = household();
    members::set_availability(
        &pool.conn,
        &SetAvailability {
            person_id: 2,
            is_available: true,
            unavailable_since: Some(100),
            unavailable_until: Some(200),
        },
    )
    .unwrap();

    let ben = members::load_member(&pool.conn, 2).unwrap();
    assert!(ben.is_available);
    assert_eq!(ben.window(), Some((100, 200)));

    let missing = members::set_availability(
        &pool.conn,
        &SetAvailability {
            person_id: 99,
            is_available: false,
            unavailable_since: None,
            unavailable_until: None,
        },
    );
    assert!(matches!(missing, Err(AppError::NotFound { kind: "Person", id: 99 })));
}

#[test]
fn chore_rows_keep_rotation_order() {
    let pool = household();
    let id = chores::insert_chore(
        &pool.conn,
        &Chore::rotating("Dishes", 1, RotationOrder::new(vec![3, 1, 2])),
    )
    .unwrap();

    let loaded = chores::load_chore(&pool.conn, id).unwrap();
    assert_eq!(loaded.rotation_order.as_slice(), &[3, 1, 2]);
    assert_eq!(loaded.last_assigned_index, -1);
    assert_eq!(loaded.last_done, None);

    let unknown = Chore::rotating("Windows", 7, RotationOrder::new(vec![1, 42]));
    assert!(matches!(
        chores::insert_chore(&pool.conn, &unknown),
        Err(AppError::NotFound { kind: "Person", id: 42 })
    ));
}

#[test]
fn completing_a_rotating_chore_advances_it() {
    let mut pool = household();
    let now = at("2026-06-15 19:00");
    let chore_id = chores::insert_chore(
        &pool.conn,
        &Chore::rotating("Dishes", 1, RotationOrder::new(vec![1, 2, 3])),
    )
    .unwrap();
    members::set_availability(
        &pool.conn,
        &SetAvailability {
            person_id: 1,
            is_available: false,
            unavailable_since: None,
            unavailable_until: None,
        },
    )
    .unwrap();

    let clock = FixedClock::at(now);
    let mut tracker = CompletionTracker::new(MemoryStore::new(), &clock);
    let avail = snapshot(&pool, now);

    let ev = CompleteLogic::chore(&mut pool, &mut tracker, &avail, chore_id, now).unwrap();
    assert_eq!(ev.member_id, 2);
    assert!(ev.rotation);
    assert!(ev.id > 0);

    let stored = chores::load_chore(&pool.conn, chore_id).unwrap();
    assert_eq!(stored.last_done, Some(now));
    assert_eq!(stored.last_assigned_index, 1);

    assert_eq!(
        tracker.record(chore_id, TaskType::Chore).map(|r| r.state),
        Some(CompletionState::Confirmed)
    );
    assert!(tracker.is_completed_today(chore_id, TaskType::Chore));

    let history = load_events(&pool.conn, Some(2)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].task_name, "Dishes");

    let log = load_log(&pool.conn).unwrap();
    assert!(log.iter().any(|e| e.operation == "complete" && e.target == format!("chore {}", chore_id)));
}

#[test]
fn watering_credits_the_owner() {
    let mut pool = household();
    let now = at("2026-06-15 08:00");
    let plant_id = plants::insert_plant(&pool.conn, &Plant::new("Fern", 3, 3, None)).unwrap();

    let clock = FixedClock::at(now);
    let mut tracker = CompletionTracker::new(MemoryStore::new(), &clock);
    let ev = CompleteLogic::plant(&mut pool, &mut tracker, plant_id, now).unwrap();

    assert_eq!(ev.member_id, 3);
    assert_eq!(plants::load_plant(&pool.conn, plant_id).unwrap().last_pour, Some(now));
    assert!(tracker.is_completed_today(plant_id, TaskType::Plant));
}

fn pending_task(pool: &DbPool, now: i64) -> i64 {
    tasks::insert_task(
        &pool.conn,
        &OneTimeTask {
            id: 0,
            name: "Call plumber".into(),
            description: None,
            assigned_to: 2,
            created_by: 1,
            created_at: now,
            completed_at: None,
            due_date: None,
            priority: Priority::High,
        },
    )
    .unwrap()
}

#[test]
fn failed_write_reverts_the_optimistic_mark() {
    let mut pool = household();
    let now = at("2026-06-15 08:00");
    let task_id = pending_task(&pool, now);
    tasks::complete_task(&pool.conn, task_id, now - 60).unwrap();

    let clock = FixedClock::at(now);
    let mut tracker = CompletionTracker::new(MemoryStore::new(), &clock);
    let result = CompleteLogic::task(&mut pool, &mut tracker, task_id, now);

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(tracker.record(task_id, TaskType::OneTime).is_none());
    assert!(load_events(&pool.conn, None).unwrap().is_empty());
    // the earlier completion is untouched
    assert_eq!(tasks::load_task(&pool.conn, task_id).unwrap().completed_at, Some(now - 60));
}

#[test]
fn failed_write_can_be_kept_as_failed() {
    let mut pool = household();
    let now = at("2026-06-15 08:00");
    let task_id = pending_task(&pool, now);
    tasks::complete_task(&pool.conn, task_id, now - 60).unwrap();

    let clock = FixedClock::at(now);
    let mut tracker =
        CompletionTracker::new(MemoryStore::new(), &clock).with_policy(RollbackPolicy::KeepFailed);
    assert!(CompleteLogic::task(&mut pool, &mut tracker, task_id, now).is_err());

    assert_eq!(
        tracker.record(task_id, TaskType::OneTime).map(|r| r.state),
        Some(CompletionState::Failed)
    );
}

#[test]
fn missing_entity_is_not_marked() {
    let mut pool = household();
    let now = at("2026-06-15 08:00");
    let clock = FixedClock::at(now);
    let mut tracker = CompletionTracker::new(MemoryStore::new(), &clock);

    let result = CompleteLogic::plant(&mut pool, &mut tracker, 77, now);
    assert!(matches!(result, Err(AppError::NotFound { kind: "Plant", id: 77 })));
    assert!(tracker.today_completions().is_empty());
}

#[test]
fn server_state_feeds_reconcile() {
    let mut pool = household();
    let now = at("2026-06-15 08:00");
    let chore_id = chores::insert_chore(&pool.conn, &Chore::single("Trash", 2, 1)).unwrap();
    plants::insert_plant(&pool.conn, &Plant::new("Fern", 3, 2, None)).unwrap();

    let clock = FixedClock::at(now);
    let mut tracker = CompletionTracker::new(MemoryStore::new(), &clock);
    let avail = snapshot(&pool, now);
    CompleteLogic::chore(&mut pool, &mut tracker, &avail, chore_id, now).unwrap();

    // another device starts from scratch and catches up
    let mut other = CompletionTracker::new(MemoryStore::new(), &clock);
    let server = CompleteLogic::server_state(&pool.conn).unwrap();
    assert_eq!(server.len(), 2);

    let report = other.reconcile(&server);
    assert_eq!(report.confirmed, 1);
    assert!(other.is_completed_today(chore_id, TaskType::Chore));
}

#[test]
fn events_between_is_half_open() {
    let pool = household();
    for ts in [100, 200, 300] {
        insert_event(&pool.conn, &event(TaskType::Chore, 1, ts)).unwrap();
    }
    insert_event(&pool.conn, &event(TaskType::Plant, 2, 250)).unwrap();

    let anna = load_events_between(&pool.conn, Some(1), 100, 300).unwrap();
    assert_eq!(anna.iter().map(|e| e.completed_at).collect::<Vec<_>>(), vec![200, 100]);
    assert_eq!(load_events_between(&pool.conn, None, 0, 1000).unwrap().len(), 4);
}

#[test]
fn streak_counts_back_from_today_or_yesterday() {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    let days: HashSet<NaiveDate> = ["2026-06-12", "2026-06-13", "2026-06-14"]
        .iter()
        .map(|s| d(s))
        .collect();

    assert_eq!(stats::current_streak(&days, d("2026-06-14")), 3);
    assert_eq!(stats::current_streak(&days, d("2026-06-15")), 3);
    assert_eq!(stats::current_streak(&days, d("2026-06-16")), 0);
    assert_eq!(stats::current_streak(&HashSet::new(), d("2026-06-16")), 0);
}

#[test]
fn gather_statistics() {
    let pool = household();
    let now = at("2026-06-15 20:00");

    for when in ["2026-06-13 09:00", "2026-06-14 09:00", "2026-06-15 09:00", "2026-06-15 18:00"] {
        insert_event(&pool.conn, &event(TaskType::Chore, 1, at(when))).unwrap();
    }
    insert_event(&pool.conn, &event(TaskType::Plant, 1, at("2026-06-01 09:00"))).unwrap();
    insert_event(&pool.conn, &event(TaskType::OneTime, 2, at("2026-06-15 10:00"))).unwrap();

    // Anna: one chore done today (on schedule), one plant never watered (due)
    let mut trash = Chore::single("Trash", 2, 1);
    trash.last_done = Some(at("2026-06-15 09:00"));
    chores::insert_chore(&pool.conn, &trash).unwrap();
    plants::insert_plant(&pool.conn, &Plant::new("Fern", 3, 1, None)).unwrap();

    let avail = snapshot(&pool, now);
    let s = stats::gather(&pool, Some(1), &avail, now).unwrap();

    assert_eq!(s.total, 5);
    assert_eq!(s.by_type["chore"], 4);
    assert_eq!(s.by_type["plant"], 1);
    assert_eq!(s.by_type["one_time"], 0);
    assert_eq!(s.streak, 3);
    assert_eq!(s.completion_rate, Some(0.5));

    assert_eq!(s.weekly.len(), 7);
    assert_eq!(s.weekly.last().map(|(_, c)| *c), Some(2));
    assert_eq!(s.weekly.iter().map(|(_, c)| c).sum::<usize>(), 4);

    let everyone = stats::gather(&pool, None, &avail, now).unwrap();
    assert_eq!(everyone.total, 6);
    assert_eq!(everyone.by_type["one_time"], 1);

    let clara = stats::gather(&pool, Some(3), &avail, now).unwrap();
    assert_eq!(clara.total, 0);
    assert_eq!(clara.completion_rate, None);
}

#[test]
fn sqlite_store_upserts() {
    let mut store = SqliteStore::from_connection(Connection::open_in_memory().unwrap()).unwrap();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}
