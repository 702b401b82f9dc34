//! Per-member view of what needs doing today.

use crate::core::availability::AvailabilityStore;
use crate::core::rotation;
use crate::core::status::{self, ActionVerb, Urgency, UrgencyThresholds};
use crate::errors::AppResult;
use crate::models::chore::Chore;
use crate::models::member::MemberId;
use crate::models::one_time_task::OneTimeTask;
use crate::models::plant::Plant;
use crate::models::task_type::TaskType;
use crate::models::wire::DashboardResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardItem {
    pub task_type: TaskType,
    pub id: i64,
    pub name: String,
    pub urgency: Urgency,
    pub status: String,
    pub rotation: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub member_id: MemberId,
    pub items: Vec<DashboardItem>,
    pub due: DashboardResponse,
    /// Assignments were computed from an old availability snapshot.
    pub stale_availability: bool,
}

impl Dashboard {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, task_type: TaskType) -> usize {
        self.items.iter().filter(|i| i.task_type == task_type).count()
    }
}

pub struct DashboardInput<'a> {
    pub plants: &'a [Plant],
    pub chores: &'a [Chore],
    pub tasks: &'a [OneTimeTask],
    pub availability: &'a AvailabilityStore,
    pub chore_thresholds: UrgencyThresholds,
    pub plant_thresholds: UrgencyThresholds,
}

/// Due plants owned by the member, due chores they are responsible for and
/// their pending one-time tasks, most urgent first.
pub fn build_dashboard(member_id: MemberId, input: &DashboardInput<'_>, now: i64) -> AppResult<Dashboard> {
    let mut dash = Dashboard {
        member_id,
        stale_availability: input.availability.is_stale(now),
        ..Default::default()
    };

    for plant in input.plants.iter().filter(|p| p.owner_id == member_id) {
        if !status::is_due(plant.last_pour, plant.interval, now)? {
            continue;
        }
        let days = status::days_since(plant.last_pour, now)?;
        dash.items.push(DashboardItem {
            task_type: TaskType::Plant,
            id: plant.id,
            name: plant.name.clone(),
            urgency: status::urgency(days, input.plant_thresholds),
            status: status::last_action_text(days, ActionVerb::Watered),
            rotation: false,
        });
        dash.due.due_plants.push(plant.clone());
    }

    for chore in input.chores {
        if rotation::responsible_member(chore, input.availability, now)? != member_id {
            continue;
        }
        if !status::is_due(chore.last_done, chore.interval, now)? {
            continue;
        }
        let days = status::days_since(chore.last_done, now)?;
        dash.items.push(DashboardItem {
            task_type: TaskType::Chore,
            id: chore.id,
            name: chore.name.clone(),
            urgency: status::urgency(days, input.chore_thresholds),
            status: status::last_action_text(days, ActionVerb::Done),
            rotation: chore.uses_rotation(),
        });
        dash.due.due_chores.push(chore.clone());
    }

    for task in input
        .tasks
        .iter()
        .filter(|t| t.assigned_to == member_id && t.is_pending())
    {
        dash.items.push(DashboardItem {
            task_type: TaskType::OneTime,
            id: task.id,
            name: task.name.clone(),
            urgency: status::one_time_urgency(task, now),
            status: status::due_text(task, now)?,
            rotation: false,
        });
        dash.due.pending_tasks.push(task.clone());
    }

    dash.items.sort_by(|a, b| b.urgency.cmp(&a.urgency));
    Ok(dash)
}
