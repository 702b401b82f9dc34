use crate::cli::parser::{Commands, TaskAction};
use crate::config::Config;
use crate::core::complete::CompleteLogic;
use crate::core::status;
use crate::db::log::audit;
use crate::db::tasks::{delete_task, insert_task, load_task, load_tasks};
use crate::errors::{AppError, AppResult};
use crate::models::one_time_task::OneTimeTask;
use crate::models::priority::Priority;
use crate::ui::messages::success;
use crate::utils::clock::Clock;
use crate::utils::colors::{RESET, color_for_urgency};
use crate::utils::date::parse_epoch;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };
    let mut pool = super::open_pool(cfg)?;
    let now = clock.now();

    match action {
        TaskAction::Add {
            name,
            assigned_to,
            created_by,
            due,
            priority,
            description,
        } => {
            let priority = Priority::from_code(priority).ok_or_else(|| {
                AppError::InvalidPriority(format!(
                    "'{}' (use low, medium or high)",
                    priority
                ))
            })?;
            let due_date = due.as_deref().map(parse_epoch).transpose()?;

            let task = OneTimeTask {
                id: 0,
                name: name.trim().to_string(),
                description: description.clone(),
                assigned_to: *assigned_to,
                created_by: created_by.unwrap_or(*assigned_to),
                created_at: now,
                completed_at: None,
                due_date,
                priority,
            };
            let id = insert_task(&pool.conn, &task)?;
            audit(&pool.conn, "add", &format!("task {}", id), &format!("Added '{}'", task.name));
            success(format!("Task '{}' added with id {}", task.name, id));
        }

        TaskAction::List { all } => {
            let tasks: Vec<OneTimeTask> = load_tasks(&pool.conn)?
                .into_iter()
                .filter(|t| *all || t.is_pending())
                .collect();
            if tasks.is_empty() {
                println!("No tasks.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Task", 24),
                Column::new("To", 4),
                Column::new("Priority", 8),
                Column::new("Due", 26),
            ]);
            for t in &tasks {
                let due = if t.is_pending() {
                    let color = color_for_urgency(status::one_time_urgency(t, now));
                    format!("{}{}{}", color, status::due_text(t, now)?, RESET)
                } else {
                    "Completed".to_string()
                };
                table.add_row(vec![
                    t.id.to_string(),
                    t.name.clone(),
                    t.assigned_to.to_string(),
                    t.priority.to_db_str().to_string(),
                    due,
                ]);
            }
            print!("{}", table.render());
        }

        TaskAction::Done { id } => {
            let mut tracker = super::open_tracker(cfg, clock)?;
            let event = CompleteLogic::task(&mut pool, &mut tracker, *id, now)?;
            success(format!("'{}' completed", event.task_name));
        }

        TaskAction::Del { id } => {
            let task = load_task(&pool.conn, *id)?;
            delete_task(&pool.conn, *id)?;
            audit(&pool.conn, "del", &format!("task {}", id), &format!("Deleted '{}'", task.name));
            success(format!("Task '{}' deleted", task.name));
        }
    }

    Ok(())
}
