use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::members::load_member;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::clock::Clock;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::formatting::pad_right;

const BAR_CHAR: char = '█';

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Stats { member } = cmd else {
        return Ok(());
    };
    let pool = super::open_pool(cfg)?;
    let now = clock.now();

    let title = match member {
        Some(id) => format!("Statistics for {}", load_member(&pool.conn, *id)?.name),
        None => "Household statistics".to_string(),
    };

    let availability = super::load_availability(&pool, cfg, now)?;
    let s = stats::gather(&pool, *member, &availability, now)?;

    header(title);
    println!("{}• Total completions:{} {}{}{}", CYAN, RESET, GREEN, s.total, RESET);
    for (kind, count) in &s.by_type {
        println!("    {} {}", pad_right(kind, 9), count);
    }

    let streak_unit = if s.streak == 1 { "day" } else { "days" };
    println!("{}• Current streak:{} {} {}", CYAN, RESET, s.streak, streak_unit);

    match s.completion_rate {
        Some(rate) => println!(
            "{}• On schedule:{} {}{:.0}%{}",
            CYAN,
            RESET,
            YELLOW,
            rate * 100.0,
            RESET
        ),
        None => println!("{}• On schedule:{} --", CYAN, RESET),
    }

    println!("\n{}Last 7 days{}", CYAN, RESET);
    for (day, count) in &s.weekly {
        let bar: String = std::iter::repeat_n(BAR_CHAR, *count).collect();
        println!("  {} {} {}", day.format("%a %d"), pad_right(&bar, 10), count);
    }

    Ok(())
}
