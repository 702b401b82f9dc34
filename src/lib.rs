//! rChoreboard library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::clock::{Clock, FixedClock, SystemClock};
use utils::date::parse_epoch;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Member { .. } => cli::commands::member::handle(&cli.command, cfg, clock),
        Commands::Chore { .. } => cli::commands::chore::handle(&cli.command, cfg, clock),
        Commands::Plant { .. } => cli::commands::plant::handle(&cli.command, cfg, clock),
        Commands::Task { .. } => cli::commands::task::handle(&cli.command, cfg, clock),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, cfg, clock),
        Commands::Today { .. } => cli::commands::today::handle(&cli.command, cfg, clock),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg, clock),
        Commands::Remind { .. } => cli::commands::remind::handle(&cli.command, cfg, clock),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde(custom_db).to_string_lossy().into_owned();
    }

    let clock: Box<dyn Clock> = match &cli.now {
        Some(when) => Box::new(FixedClock::at(parse_epoch(when)?)),
        None => Box::new(SystemClock),
    };

    dispatch(&cli, &cfg, clock.as_ref())
}
