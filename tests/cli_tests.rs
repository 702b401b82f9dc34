mod common;
use common::{init_household, rcb, setup_test_db};
use predicates::prelude::*;
use predicates::str::contains;

const MORNING: &str = "2026-06-15 08:00";

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    rcb()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_member_list_and_availability() {
    let db_path = setup_test_db("members");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "member", "list"])
        .assert()
        .success()
        .stdout(contains("Anna"))
        .stdout(contains("Ben"))
        .stdout(contains("Clara"));

    rcb()
        .args(["--db", &db_path, "member", "unavailable", "2"])
        .assert()
        .success()
        .stdout(contains("Ben is now unavailable"));

    rcb()
        .args([
            "--db",
            &db_path,
            "member",
            "away",
            "3",
            "--from",
            "2026-06-20",
            "--until",
            "2026-06-27",
        ])
        .assert()
        .success()
        .stdout(contains("Clara is now away from"));

    rcb()
        .args([
            "--db",
            &db_path,
            "member",
            "away",
            "3",
            "--from",
            "2026-06-27",
            "--until",
            "2026-06-20",
        ])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_rotating_chore_moves_to_next_member() {
    let db_path = setup_test_db("rotation");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Dishes", "--rotation", "1,2,3"])
        .assert()
        .success()
        .stdout(contains("Chore 'Dishes' added with id 1"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "who", "1"])
        .assert()
        .success()
        .stdout(contains("up for Anna"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "done", "1"])
        .assert()
        .success()
        .stdout(contains("'Dishes' done, credited to Anna"))
        .stdout(contains("Next up: Ben"));

    rcb()
        .args(["--db", &db_path, "member", "unavailable", "2"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "who", "1"])
        .assert()
        .success()
        .stdout(contains("up for Clara"))
        .stdout(contains("skipped Ben"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "done", "1"])
        .assert()
        .success()
        .stdout(contains("credited to Clara"))
        .stdout(contains("Next up: Anna"));
}

#[test]
fn test_chore_needs_an_assignee() {
    let db_path = setup_test_db("chore_assignee");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Trash"])
        .assert()
        .failure()
        .stderr(contains("Error:"));

    rcb()
        .args(["--db", &db_path, "chore", "add", "Trash", "--worker", "42"])
        .assert()
        .failure()
        .stderr(contains("Error:"));

    rcb()
        .args(["--db", &db_path, "chore", "add", "Trash", "--rotation", "1,2,1"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_single_worker_chore() {
    let db_path = setup_test_db("single_worker");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Trash", "--interval", "2", "--worker", "2"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "who", "1"])
        .assert()
        .success()
        .stdout(contains("always done by Ben"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "done", "1"])
        .assert()
        .success()
        .stdout(contains("credited to Ben"))
        .stdout(contains("Next up").not());
}

#[test]
fn test_plant_and_task_completion() {
    let db_path = setup_test_db("plants_tasks");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "plant", "add", "Fern", "--owner", "1"])
        .assert()
        .success()
        .stdout(contains("Plant 'Fern' added with id 1"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "plant", "water", "1"])
        .assert()
        .success()
        .stdout(contains("'Fern' watered"));

    rcb()
        .args([
            "--db",
            &db_path,
            "task",
            "add",
            "Call plumber",
            "--to",
            "2",
            "--by",
            "1",
            "--priority",
            "high",
        ])
        .assert()
        .success()
        .stdout(contains("Task 'Call plumber' added with id 1"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "task", "done", "1"])
        .assert()
        .success()
        .stdout(contains("'Call plumber' completed"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "task", "done", "1"])
        .assert()
        .failure()
        .stderr(contains("already completed"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "plant", "water", "9"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_dashboard_json_and_text() {
    let db_path = setup_test_db("dashboard");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Dishes", "--rotation", "1,2"])
        .assert()
        .success();
    rcb()
        .args(["--db", &db_path, "plant", "add", "Basil", "--interval", "1", "--owner", "2"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "dashboard", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"dueChores\""))
        .stdout(contains("\"duePlants\""))
        .stdout(contains("\"pendingTasks\""))
        .stdout(contains("Dishes"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "dashboard", "2"])
        .assert()
        .success()
        .stdout(contains("Today for Ben"))
        .stdout(contains("Basil"))
        .stdout(contains("0 chores, 1 plants, 0 tasks"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "dashboard", "3"])
        .assert()
        .success()
        .stdout(contains("Nothing due"));

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "dashboard", "99"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_today_records_and_reset() {
    let db_path = setup_test_db("today");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Dishes", "--rotation", "1,2"])
        .assert()
        .success();
    rcb()
        .args(["--db", &db_path, "--now", MORNING, "chore", "done", "1"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-15 20:00", "today"])
        .assert()
        .success()
        .stdout(contains("Completions recorded for 2026-06-15"))
        .stdout(contains("confirmed"));

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-16 00:05", "today", "--check"])
        .assert()
        .success()
        .stdout(contains("A new day has started"))
        .stdout(contains("none yet"));

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-16 00:10", "today", "--check"])
        .assert()
        .success()
        .stdout(contains("Still the same day"));
}

#[test]
fn test_today_sync_restores_marks() {
    let db_path = setup_test_db("today_sync");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "plant", "add", "Fern", "--owner", "1"])
        .assert()
        .success();
    rcb()
        .args(["--db", &db_path, "--now", MORNING, "plant", "water", "1"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "--now", MORNING, "today", "--clear"])
        .assert()
        .success()
        .stdout(contains("cleared"));

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-15 09:00", "today", "--sync"])
        .assert()
        .success()
        .stdout(contains("1 confirmed, 0 removed"))
        .stdout(contains("Plant"));
}

#[test]
fn test_stats_and_remind() {
    let db_path = setup_test_db("stats");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Dishes", "--rotation", "1,2"])
        .assert()
        .success();
    rcb()
        .args(["--db", &db_path, "--now", "2026-06-14 19:00", "chore", "done", "1"])
        .assert()
        .success();
    rcb()
        .args(["--db", &db_path, "--now", "2026-06-15 19:00", "chore", "done", "1"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-15 20:00", "stats"])
        .assert()
        .success()
        .stdout(contains("Total completions:"))
        .stdout(contains("Current streak:"))
        .stdout(contains("Last 7 days"));

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-16 07:00", "remind", "--member", "1"])
        .assert()
        .success()
        .stdout(contains("Good morning, Anna!"))
        .stdout(contains("Chores: Dishes"));

    rcb()
        .args(["--db", &db_path, "--now", "2026-06-16 07:00", "remind", "--member", "3"])
        .assert()
        .success()
        .stdout(contains("No tasks for you today!"));
}

#[test]
fn test_log_and_db_info() {
    let db_path = setup_test_db("log_info");
    init_household(&db_path);

    rcb()
        .args(["--db", &db_path, "chore", "add", "Dishes", "--rotation", "1,2"])
        .assert()
        .success();

    rcb()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("Added 'Dishes'"));

    rcb()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Members:"))
        .stdout(contains("Chores:"));

    rcb()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Rotation orders only name known members"))
        .stdout(contains("5 migrations applied"));

    rcb()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Schema already up to date"));
}
