use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{DashboardInput, build_dashboard};
use crate::core::reminder::build_reminder;
use crate::db::members::{load_member, load_members};
use crate::db::{chores, plants, tasks};
use crate::errors::AppResult;
use crate::utils::clock::Clock;
use crate::utils::formatting::bold;

/// Print the reminder each member would receive this morning.
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Remind { member } = cmd else {
        return Ok(());
    };
    let pool = super::open_pool(cfg)?;
    let now = clock.now();

    let members = match member {
        Some(id) => vec![load_member(&pool.conn, *id)?],
        None => load_members(&pool.conn)?,
    };
    if members.is_empty() {
        println!("No members yet.");
        return Ok(());
    }

    let plants = plants::load_plants(&pool.conn)?;
    let chores = chores::load_chores(&pool.conn)?;
    let tasks = tasks::load_tasks(&pool.conn)?;
    let availability = super::load_availability(&pool, cfg, now)?;
    let input = DashboardInput {
        plants: &plants,
        chores: &chores,
        tasks: &tasks,
        availability: &availability,
        chore_thresholds: cfg.chore_urgency,
        plant_thresholds: cfg.plant_urgency,
    };

    for m in &members {
        let dash = build_dashboard(m.id, &input, now)?;
        let chore_names: Vec<String> = dash.due.due_chores.iter().map(|c| c.name.clone()).collect();
        let plant_names: Vec<String> = dash.due.due_plants.iter().map(|p| p.name.clone()).collect();

        let reminder = build_reminder(&m.name, &chore_names, &plant_names);
        println!("{}\n{}\n", bold(&reminder.title), reminder.body);
    }

    Ok(())
}
