#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rhabitlogger::core::habit::HabitLogic;
use rhabitlogger::core::settings::SettingsLogic;
use rhabitlogger::db::initialize::init_db;
use rhabitlogger::db::pool::DbPool;
use rhabitlogger::models::habit::{Habit, HabitInput};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with its config directory pointed at the temp dir so tests
/// never read or write the user's real configuration.
pub fn rhl() -> Command {
    let mut cmd = cargo_bin_cmd!("rhabitlogger");
    cmd.env(
        rhabitlogger::config::HOME_ENV,
        env::temp_dir().join("rhabitlogger_test_home"),
    );
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rhabitlogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `--test init` on a fresh database file.
pub fn init_test_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    rhl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();
    db_path
}

/// Parse the JSON a `--json` invocation printed on stdout.
pub fn json_out(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

// ---------------------------------------------------------------------------
// library-level helpers
// ---------------------------------------------------------------------------

pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("valid timestamp")
}

pub fn timed_habit(pool: &mut DbPool, name: &str, estimate: Option<i64>) -> Habit {
    HabitLogic::create(pool, HabitInput::new(name).with_timer(estimate)).expect("create habit")
}

pub fn plain_habit(pool: &mut DbPool, name: &str) -> Habit {
    HabitLogic::create(pool, HabitInput::new(name)).expect("create habit")
}

pub fn enable_carryover(pool: &mut DbPool) {
    SettingsLogic::update(pool, Some(true)).expect("enable carryover");
}
