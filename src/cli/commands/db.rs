use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::chores::load_chores;
use crate::db::initialize::init_db;
use crate::db::members::load_members;
use crate::db::migrate::{applied_versions, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::collections::HashSet;

/// Apply pending migrations and list only the ones this run added.
fn migrate(pool: &DbPool) -> AppResult<()> {
    println!("{}▶ Running migrations…{}", CYAN, RESET);
    let before: HashSet<String> = applied_versions(&pool.conn)?.into_iter().collect();
    run_pending_migrations(&pool.conn)?;

    let added: Vec<String> = applied_versions(&pool.conn)?
        .into_iter()
        .filter(|v| !before.contains(v))
        .collect();
    if added.is_empty() {
        println!("{}✔ Schema already up to date.{}\n", GREEN, RESET);
    } else {
        for version in &added {
            println!("  • {}", version);
        }
        println!("{}✔ {} migration(s) applied.{}\n", GREEN, added.len(), RESET);
    }
    Ok(())
}

/// SQLite integrity, foreign keys, rotation members and schema version.
fn check(pool: &DbPool) -> AppResult<()> {
    println!("{}▶ Checking household database…{}", CYAN, RESET);

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity == "ok" {
        println!("{}✔ Integrity check passed.{}", GREEN, RESET);
    } else {
        println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
    }

    let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check;")?;
    let broken = stmt.query_map([], |_| Ok(()))?.count();
    if broken == 0 {
        println!("{}✔ Member references are consistent.{}", GREEN, RESET);
    } else {
        println!("{}✘ {} row(s) point to missing members.{}", RED, broken, RESET);
    }

    let known: HashSet<i64> = load_members(&pool.conn)?.iter().map(|m| m.id).collect();
    let mut dangling = 0;
    for chore in load_chores(&pool.conn)? {
        let missing: Vec<String> = chore
            .rotation_order
            .iter()
            .filter(|id| !known.contains(*id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            dangling += 1;
            println!(
                "{}⚠ chore {} '{}' rotates unknown member(s): {}{}",
                YELLOW,
                chore.id,
                chore.name,
                missing.join(", "),
                RESET
            );
        }
    }
    if dangling == 0 {
        println!("{}✔ Rotation orders only name known members.{}", GREEN, RESET);
    }

    let versions = applied_versions(&pool.conn)?;
    match versions.last() {
        Some(latest) => println!(
            "{}• Schema:{} {} migrations applied (latest {})\n",
            CYAN,
            RESET,
            versions.len(),
            latest
        ),
        None => println!("{}• Schema:{} not initialized\n", CYAN, RESET),
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate: do_migrate,
        check: do_check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };
    if !(*do_migrate || *do_check || *vacuum || *info) {
        return Ok(());
    }

    let mut pool = DbPool::new(&cfg.database)?;

    if *do_migrate {
        migrate(&pool)?;
    }

    if *info {
        init_db(&pool.conn)?;
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *do_check {
        init_db(&pool.conn)?;
        check(&pool)?;
    }

    if *vacuum {
        println!("{}▶ Running VACUUM…{}", CYAN, RESET);
        pool.conn.execute_batch("VACUUM;")?;
        println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
    }

    Ok(())
}
