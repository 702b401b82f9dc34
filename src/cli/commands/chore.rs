use crate::cli::parser::{ChoreAction, Commands};
use crate::config::Config;
use crate::core::complete::CompleteLogic;
use crate::core::rotation;
use crate::core::status::{self, ActionVerb};
use crate::db::chores::{delete_chore, insert_chore, load_chore, load_chores, update_chore};
use crate::db::log::audit;
use crate::db::members::load_members;
use crate::errors::{AppError, AppResult};
use crate::models::chore::Chore;
use crate::models::member::{FamilyMember, MemberId};
use crate::models::rotation_order::RotationOrder;
use crate::ui::messages::{info, success, warning};
use crate::utils::clock::Clock;
use crate::utils::colors::{RESET, color_for_urgency};
use crate::utils::table::{Column, Table};

fn member_name(members: &[FamilyMember], id: MemberId) -> String {
    members
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Chore { action } = cmd else {
        return Ok(());
    };
    let mut pool = super::open_pool(cfg)?;
    let now = clock.now();

    match action {
        ChoreAction::Add {
            name,
            interval,
            worker,
            rotation,
        } => {
            let chore = match (worker, rotation) {
                (_, Some(list)) => Chore::rotating(name, *interval, RotationOrder::parse_list(list)?),
                (Some(w), None) => Chore::single(name, *interval, *w),
                (None, None) => {
                    return Err(AppError::Validation(
                        "a chore needs --worker <ID> or --rotation <IDS>".into(),
                    ));
                }
            };
            let id = insert_chore(&pool.conn, &chore)?;
            audit(&pool.conn, "add", &format!("chore {}", id), &format!("Added '{}'", chore.name));
            success(format!("Chore '{}' added with id {}", chore.name, id));
        }

        ChoreAction::Edit {
            id,
            name,
            interval,
            worker,
            rotation,
            no_rotation,
        } => {
            let mut chore = load_chore(&pool.conn, *id)?;
            if let Some(n) = name {
                chore.name = n.trim().to_string();
            }
            if let Some(i) = interval {
                chore.interval = *i;
            }
            if let Some(w) = worker {
                chore.worker_id = Some(*w);
            }
            if let Some(list) = rotation {
                let order = RotationOrder::parse_list(list)?;
                // a different order restarts from its first member
                if order != chore.rotation_order {
                    chore.last_assigned_index = -1;
                }
                chore.rotation_order = order;
                chore.rotation_enabled = true;
            }
            if *no_rotation {
                chore.rotation_enabled = false;
                chore.rotation_order = RotationOrder::default();
                chore.last_assigned_index = -1;
            }
            update_chore(&pool.conn, &chore)?;
            audit(&pool.conn, "edit", &format!("chore {}", chore.id), &format!("Updated '{}'", chore.name));
            success(format!("Chore '{}' updated", chore.name));
        }

        ChoreAction::List => {
            let chores = load_chores(&pool.conn)?;
            if chores.is_empty() {
                println!("No chores yet.");
                return Ok(());
            }
            let members = load_members(&pool.conn)?;
            let availability = super::load_availability(&pool, cfg, now)?;

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Chore", 20),
                Column::new("Every", 6),
                Column::new("Responsible", 16),
                Column::new("Last done", 26),
                Column::new("Rotation", 20),
            ]);
            for c in &chores {
                let responsible = match rotation::responsible_member(c, &availability, now) {
                    Ok(id) => member_name(&members, id),
                    Err(_) => "--".to_string(),
                };
                let days = status::days_since(c.last_done, now)?;
                let color = color_for_urgency(status::urgency(days, cfg.chore_urgency));
                let order = if c.uses_rotation() {
                    c.rotation_order
                        .iter()
                        .map(|id| member_name(&members, *id))
                        .collect::<Vec<_>>()
                        .join(" → ")
                } else {
                    "--".to_string()
                };
                table.add_row(vec![
                    c.id.to_string(),
                    c.name.clone(),
                    format!("{}d", c.interval),
                    responsible,
                    format!("{}{}{}", color, status::last_action_text(days, ActionVerb::Done), RESET),
                    order,
                ]);
            }
            print!("{}", table.render());
        }

        ChoreAction::Who { id } => {
            let chore = load_chore(&pool.conn, *id)?;
            let members = load_members(&pool.conn)?;
            let availability = super::load_availability(&pool, cfg, now)?;

            if !chore.uses_rotation() {
                let worker = rotation::responsible_member(&chore, &availability, now)?;
                info(format!("'{}' is always done by {}", chore.name, member_name(&members, worker)));
                return Ok(());
            }

            let assignment = rotation::resolve(&chore, &availability, now)?;
            super::warn_if_stale(&availability, now);
            info(format!(
                "'{}' is up for {} (position {} of {})",
                chore.name,
                member_name(&members, assignment.member_id),
                assignment.position + 1,
                chore.rotation_order.len()
            ));
            for skipped in &assignment.skipped {
                println!("  ↷ skipped {} (unavailable)", member_name(&members, *skipped));
            }
            if assignment.fallback {
                warning("Nobody in the rotation is available; keeping the regular turn.");
            }
        }

        ChoreAction::Done { id } => {
            let availability = super::load_availability(&pool, cfg, now)?;
            super::warn_if_stale(&availability, now);
            let mut tracker = super::open_tracker(cfg, clock)?;
            let event = CompleteLogic::chore(&mut pool, &mut tracker, &availability, *id, now)?;

            let members = load_members(&pool.conn)?;
            success(format!(
                "'{}' done, credited to {}",
                event.task_name,
                member_name(&members, event.member_id)
            ));

            if event.rotation {
                let chore = load_chore(&pool.conn, *id)?;
                let next = rotation::current_assignee(&chore, &availability, now)?;
                info(format!("Next up: {}", member_name(&members, next)));
            }
        }

        ChoreAction::Del { id } => {
            let chore = load_chore(&pool.conn, *id)?;
            delete_chore(&pool.conn, *id)?;
            audit(&pool.conn, "del", &format!("chore {}", id), &format!("Deleted '{}'", chore.name));
            success(format!("Chore '{}' deleted", chore.name));
        }
    }

    Ok(())
}
