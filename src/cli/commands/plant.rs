use crate::cli::parser::{Commands, PlantAction};
use crate::config::Config;
use crate::core::complete::CompleteLogic;
use crate::core::status::{self, ActionVerb};
use crate::db::log::audit;
use crate::db::members::load_members;
use crate::db::plants::{delete_plant, insert_plant, load_plant, load_plants};
use crate::errors::AppResult;
use crate::models::plant::Plant;
use crate::ui::messages::success;
use crate::utils::clock::Clock;
use crate::utils::colors::{RESET, color_for_urgency, colorize_optional};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Plant { action } = cmd else {
        return Ok(());
    };
    let mut pool = super::open_pool(cfg)?;
    let now = clock.now();

    match action {
        PlantAction::Add {
            name,
            interval,
            owner,
            image,
        } => {
            let plant = Plant::new(name, *interval, *owner, image.clone());
            let id = insert_plant(&pool.conn, &plant)?;
            audit(&pool.conn, "add", &format!("plant {}", id), &format!("Added '{}'", plant.name));
            success(format!("Plant '{}' added with id {}", plant.name, id));
        }

        PlantAction::List => {
            let plants = load_plants(&pool.conn)?;
            if plants.is_empty() {
                println!("No plants yet.");
                return Ok(());
            }
            let members = load_members(&pool.conn)?;

            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("Plant", 20),
                Column::new("Every", 6),
                Column::new("Owner", 16),
                Column::new("Last watered", 29),
                Column::new("Due", 4),
            ]);
            for p in &plants {
                let owner = members
                    .iter()
                    .find(|m| m.id == p.owner_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| "--".to_string());
                let days = status::days_since(p.last_pour, now)?;
                let color = color_for_urgency(status::urgency(days, cfg.plant_urgency));
                let due = if status::is_due(p.last_pour, p.interval, now)? {
                    "yes"
                } else {
                    "no"
                };
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    format!("{}d", p.interval),
                    colorize_optional(&owner),
                    format!("{}{}{}", color, status::last_action_text(days, ActionVerb::Watered), RESET),
                    due.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        PlantAction::Water { id } => {
            let mut tracker = super::open_tracker(cfg, clock)?;
            let event = CompleteLogic::plant(&mut pool, &mut tracker, *id, now)?;
            success(format!("'{}' watered", event.task_name));
        }

        PlantAction::Del { id } => {
            let plant = load_plant(&pool.conn, *id)?;
            delete_plant(&pool.conn, *id)?;
            audit(&pool.conn, "del", &format!("plant {}", id), &format!("Deleted '{}'", plant.name));
            success(format!("Plant '{}' deleted", plant.name));
        }
    }

    Ok(())
}
