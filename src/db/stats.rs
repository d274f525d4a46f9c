use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Serialize)]
pub struct DbInfo {
    pub file: String,
    pub size_bytes: u64,
    pub habits: i64,
    pub habit_logs: i64,
    pub timer_sessions: i64,
    pub notes: i64,
    pub first_log_date: Option<String>,
    pub last_log_date: Option<String>,
    pub migrations: Vec<String>,
}

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
}

pub fn collect_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<DbInfo> {
    let conn = &pool.conn;

    let first_log_date: Option<String> = conn
        .query_row(
            "SELECT date FROM habit_logs ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_log_date: Option<String> = conn
        .query_row(
            "SELECT date FROM habit_logs ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbInfo {
        file: db_path.to_string(),
        size_bytes: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        habits: count(conn, "habits")?,
        habit_logs: count(conn, "habit_logs")?,
        timer_sessions: count(conn, "timer_sessions")?,
        notes: count(conn, "notes")?,
        first_log_date,
        last_log_date,
        migrations: applied_versions(conn)?,
    })
}

pub fn print_db_info(info: &DbInfo) {
    println!();

    let file_mb = (info.size_bytes as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, info.file, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!("{}• Habits:{} {}{}{}", CYAN, RESET, GREEN, info.habits, RESET);
    println!(
        "{}• Habit logs:{} {}{}{}",
        CYAN, RESET, GREEN, info.habit_logs, RESET
    );
    println!(
        "{}• Timer sessions:{} {}{}{}",
        CYAN, RESET, GREEN, info.timer_sessions, RESET
    );
    println!("{}• Notes:{} {}{}{}", CYAN, RESET, GREEN, info.notes, RESET);

    let fmt_first = info
        .first_log_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = info
        .last_log_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Log date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!("{}• Migrations applied:{} {}", CYAN, RESET, info.migrations.len());
    for m in &info.migrations {
        println!("    {GREY}{m}{RESET}");
    }

    println!();
}
