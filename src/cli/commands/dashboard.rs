use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{DashboardInput, build_dashboard};
use crate::db::members::load_member;
use crate::db::{chores, plants, tasks};
use crate::errors::AppResult;
use crate::models::completion::CompletionState;
use crate::models::task_type::TaskType;
use crate::ui::messages::header;
use crate::utils::clock::Clock;
use crate::utils::colors::{GREY, RED, RESET, color_for_urgency};
use crate::utils::formatting::{describe_task_type, pad_right};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Dashboard { member, json } = cmd else {
        return Ok(());
    };
    let pool = super::open_pool(cfg)?;
    let now = clock.now();

    let person = load_member(&pool.conn, *member)?;
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
    let dash = build_dashboard(person.id, &input, now)?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&dash.due)?);
        return Ok(());
    }

    header(format!("Today for {}", person.name));
    if dash.stale_availability {
        super::warn_if_stale(&availability, now);
    }
    if dash.is_empty() {
        println!("Nothing due. 🎉");
        return Ok(());
    }

    let tracker = super::open_tracker(cfg, clock)?;

    for item in &dash.items {
        let (label, type_color) = describe_task_type(item.task_type);
        let urgency_color = color_for_urgency(item.urgency);
        let rotation = if item.rotation { " 🔄" } else { "" };

        let mark = match tracker.record(item.id, item.task_type) {
            Some(r) if r.state == CompletionState::Failed => format!(" {RED}✘ not saved{RESET}"),
            Some(r) if r.state == CompletionState::Pending => format!(" {GREY}⏳ saving{RESET}"),
            _ => String::new(),
        };

        println!(
            "{}{}{} {}{}{} {}{} {}({}){}{}",
            type_color,
            pad_right(label, 9),
            RESET,
            urgency_color,
            pad_right(item.urgency.label(), 7),
            RESET,
            item.name,
            rotation,
            GREY,
            item.status,
            RESET,
            mark
        );
    }

    println!(
        "\n{} chores, {} plants, {} tasks",
        dash.count(TaskType::Chore),
        dash.count(TaskType::Plant),
        dash.count(TaskType::OneTime)
    );

    Ok(())
}
