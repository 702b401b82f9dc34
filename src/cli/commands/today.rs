use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::complete::CompleteLogic;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::models::completion::CompletionState;
use crate::ui::messages::{info, success};
use crate::utils::clock::Clock;
use crate::utils::colors::{GREEN, GREY, RED, RESET, YELLOW};
use crate::utils::format_epoch;
use crate::utils::formatting::{describe_task_type, mins2readable, pad_right};
use std::thread;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let Commands::Today {
        reset,
        check,
        sync,
        clear,
        watch,
    } = cmd
    else {
        return Ok(());
    };

    let pool = super::open_pool(cfg)?;
    let mut tracker = super::open_tracker(cfg, clock)?;

    if *clear {
        tracker.clear_all();
        audit(&pool.conn, "reset", "today", "Local completion state cleared");
        success("Local completion state cleared.");
        return Ok(());
    }

    if *reset {
        tracker.force_reset();
        audit(&pool.conn, "reset", "today", "Completion records reset");
        success("Today's completion records were reset.");
    }

    if *check {
        if tracker.check_and_reset() {
            audit(&pool.conn, "reset", "today", "Day changed, completion records reset");
            success("A new day has started: completion records reset.");
        } else {
            info("Still the same day; nothing to reset.");
        }
    }

    if *sync {
        let server = CompleteLogic::server_state(&pool.conn)?;
        let report = tracker.reconcile(&server);
        info(format!(
            "Synced with the database: {} confirmed, {} removed",
            report.confirmed, report.removed
        ));
    }

    if *watch {
        info("Watching for midnight (Ctrl+C to stop)…");
        let poll = cfg.poll_secs();
        loop {
            let wait = tracker.seconds_until_midnight().clamp(1, poll);
            thread::sleep(Duration::from_secs(wait as u64));
            if tracker.check_and_reset() {
                audit(&pool.conn, "reset", "today", "Midnight passed, completion records reset");
                success("Midnight passed: completion records reset.");
            }
        }
    }

    let records = tracker.today_completions();
    let day = tracker
        .last_reset()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "--".to_string());

    println!("📅 Completions recorded for {}:\n", day);
    if records.is_empty() {
        println!("  {GREY}none yet{RESET}");
    }
    for r in &records {
        let (label, color) = describe_task_type(r.task_type);
        let state = match r.state {
            CompletionState::Pending => format!("{YELLOW}pending{RESET}"),
            CompletionState::Confirmed => format!("{GREEN}confirmed{RESET}"),
            CompletionState::Failed => format!("{RED}failed{RESET}"),
        };
        println!(
            "  {}{}{} #{:<4} {}  {}",
            color,
            pad_right(label, 9),
            RESET,
            r.id,
            format_epoch(Some(r.completed_at)),
            state
        );
    }

    let left = tracker.seconds_until_midnight();
    println!("\n⏰ Reset in {}", mins2readable(left / 60, false));

    Ok(())
}
