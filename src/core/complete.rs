use crate::core::availability::AvailabilityStore;
use crate::core::rotation;
use crate::core::storage::KeyValueStore;
use crate::core::tracker::{CompletionTracker, ServerCompletion};
use crate::db::completions::insert_event;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{chores, plants, tasks};
use crate::errors::AppResult;
use crate::models::completion::CompletionEvent;
use crate::models::task_type::TaskType;
use crate::utils::clock::Clock;
use rusqlite::Connection;

/// High-level business logic for completing chores, plants and tasks.
///
/// Every completion is marked in the tracker first, then written to the
/// database in one transaction. The mark is confirmed on commit and handed
/// to the rollback policy on failure.
pub struct CompleteLogic;

fn persist<F>(pool: &mut DbPool, write: F) -> AppResult<()>
where
    F: FnOnce(&Connection) -> AppResult<()>,
{
    let tx = pool.conn.transaction()?;
    write(&tx)?;
    tx.commit()?;
    Ok(())
}

fn settle<S: KeyValueStore, C: Clock, T>(
    tracker: &mut CompletionTracker<S, C>,
    id: i64,
    task_type: TaskType,
    result: AppResult<T>,
) -> AppResult<T> {
    match result {
        Ok(v) => {
            tracker.confirm(id, task_type);
            Ok(v)
        }
        Err(e) => {
            tracker.fail(id, task_type);
            Err(e)
        }
    }
}

impl CompleteLogic {
    /// Complete a chore: credit the responsible member and move the rotation on.
    pub fn chore<S: KeyValueStore, C: Clock>(
        pool: &mut DbPool,
        tracker: &mut CompletionTracker<S, C>,
        availability: &AvailabilityStore,
        chore_id: i64,
        at: i64,
    ) -> AppResult<CompletionEvent> {
        let chore = chores::load_chore(&pool.conn, chore_id)?;
        let advanced = rotation::advance_with_credit(&chore, availability, at)?;

        let mut event = CompletionEvent {
            id: 0,
            task_id: chore.id,
            task_type: TaskType::Chore,
            task_name: chore.name.clone(),
            member_id: advanced.credited,
            completed_at: at,
            rotation: chore.uses_rotation(),
        };

        tracker.mark_completed(chore.id, TaskType::Chore, at);
        let result = persist(pool, |conn| {
            chores::save_completion(conn, &advanced.chore)?;
            event.id = insert_event(conn, &event)?;
            Ok(())
        });
        settle(tracker, chore.id, TaskType::Chore, result)?;

        audit(
            &pool.conn,
            "complete",
            &format!("chore {}", chore.id),
            &format!("'{}' done by member {}", chore.name, advanced.credited),
        );
        Ok(event)
    }

    /// Water a plant; the owner gets the credit.
    pub fn plant<S: KeyValueStore, C: Clock>(
        pool: &mut DbPool,
        tracker: &mut CompletionTracker<S, C>,
        plant_id: i64,
        at: i64,
    ) -> AppResult<CompletionEvent> {
        let plant = plants::load_plant(&pool.conn, plant_id)?;

        let mut event = CompletionEvent {
            id: 0,
            task_id: plant.id,
            task_type: TaskType::Plant,
            task_name: plant.name.clone(),
            member_id: plant.owner_id,
            completed_at: at,
            rotation: false,
        };

        tracker.mark_completed(plant.id, TaskType::Plant, at);
        let result = persist(pool, |conn| {
            plants::mark_watered(conn, plant.id, at)?;
            event.id = insert_event(conn, &event)?;
            Ok(())
        });
        settle(tracker, plant.id, TaskType::Plant, result)?;

        audit(
            &pool.conn,
            "complete",
            &format!("plant {}", plant.id),
            &format!("'{}' watered", plant.name),
        );
        Ok(event)
    }

    pub fn task<S: KeyValueStore, C: Clock>(
        pool: &mut DbPool,
        tracker: &mut CompletionTracker<S, C>,
        task_id: i64,
        at: i64,
    ) -> AppResult<CompletionEvent> {
        let task = tasks::load_task(&pool.conn, task_id)?;

        let mut event = CompletionEvent {
            id: 0,
            task_id: task.id,
            task_type: TaskType::OneTime,
            task_name: task.name.clone(),
            member_id: task.assigned_to,
            completed_at: at,
            rotation: false,
        };

        tracker.mark_completed(task.id, TaskType::OneTime, at);
        let result = persist(pool, |conn| {
            tasks::complete_task(conn, task.id, at)?;
            event.id = insert_event(conn, &event)?;
            Ok(())
        });
        settle(tracker, task.id, TaskType::OneTime, result)?;

        audit(
            &pool.conn,
            "complete",
            &format!("task {}", task.id),
            &format!("'{}' completed by member {}", task.name, task.assigned_to),
        );
        Ok(event)
    }

    /// Last completion of every task as stored in the database, for
    /// [`CompletionTracker::reconcile`].
    pub fn server_state(conn: &Connection) -> AppResult<Vec<ServerCompletion>> {
        let mut out = Vec::new();

        for c in chores::load_chores(conn)? {
            out.push(ServerCompletion {
                id: c.id,
                task_type: TaskType::Chore,
                completed_at: c.last_done,
            });
        }
        for p in plants::load_plants(conn)? {
            out.push(ServerCompletion {
                id: p.id,
                task_type: TaskType::Plant,
                completed_at: p.last_pour,
            });
        }
        for t in tasks::load_tasks(conn)? {
            out.push(ServerCompletion {
                id: t.id,
                task_type: TaskType::OneTime,
                completed_at: t.completed_at,
            });
        }

        Ok(out)
    }
}
