#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rchoreboard::core::availability::{Availability, AvailabilityStore};
use rchoreboard::models::chore::Chore;
use rchoreboard::models::member::MemberId;
use rchoreboard::models::rotation_order::RotationOrder;
use rchoreboard::utils::date::parse_epoch;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rcb() -> Command {
    cargo_bin_cmd!("rchoreboard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rchoreboard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a DB with three members: Anna (1), Ben (2), Clara (3).
pub fn init_household(db_path: &str) {
    rcb()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (name, role) in [("Anna", "parent"), ("Ben", "child"), ("Clara", "child")] {
        rcb()
            .args(["--db", db_path, "member", "add", name, "--role", role])
            .assert()
            .success();
    }
}

/// Local wall-clock time as epoch seconds.
pub fn at(when: &str) -> i64 {
    parse_epoch(when).expect("valid test time")
}

pub fn rotating(order: &[MemberId], last_assigned_index: i64) -> Chore {
    let mut chore = Chore::rotating("Dishes", 1, RotationOrder::new(order.to_vec()));
    chore.id = 1;
    chore.last_assigned_index = last_assigned_index;
    chore
}

/// Store where `available` members are free and `away` ones are not.
pub fn availability(available: &[MemberId], away: &[MemberId]) -> AvailabilityStore {
    let mut store = AvailabilityStore::new(0);
    for id in available {
        store.insert(*id, Availability::available());
    }
    for id in away {
        store.insert(*id, Availability::unavailable());
    }
    store
}
