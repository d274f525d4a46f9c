use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// A versioned schema change. Applied at most once; the `log` table keeps
/// a `migration_applied` row per version.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20251001_0001_create_habit_tables",
        description: "Created habits, habit_logs, timer_sessions and app_settings tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS habits (
            id                          INTEGER PRIMARY KEY AUTOINCREMENT,
            name                        TEXT NOT NULL,
            description                 TEXT,
            is_repeatable               INTEGER NOT NULL DEFAULT 1,
            has_timer                   INTEGER NOT NULL DEFAULT 0,
            estimated_duration_seconds  INTEGER,
            schedule_days               TEXT,
            start_date                  TEXT,
            is_archived                 INTEGER NOT NULL DEFAULT 0,
            is_active                   INTEGER NOT NULL DEFAULT 1,
            created_at                  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habit_logs (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id            INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            date                TEXT NOT NULL,
            completed           INTEGER NOT NULL DEFAULT 0,
            time_spent_seconds  INTEGER NOT NULL DEFAULT 0,
            carryover_seconds   INTEGER NOT NULL DEFAULT 0 CHECK(carryover_seconds >= 0),
            deficit_seconds     INTEGER NOT NULL DEFAULT 0 CHECK(deficit_seconds >= 0),
            created_at          TEXT NOT NULL,
            UNIQUE(habit_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_habit_logs_date ON habit_logs(date);

        CREATE TABLE IF NOT EXISTS timer_sessions (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id          INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            date              TEXT NOT NULL,
            start_time        TEXT NOT NULL,
            end_time          TEXT,
            duration_seconds  INTEGER NOT NULL DEFAULT 0,
            is_running        INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_timer_sessions_habit_date ON timer_sessions(habit_id, date);

        CREATE TABLE IF NOT EXISTS app_settings (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            key    TEXT NOT NULL UNIQUE,
            value  TEXT
        );
        "#,
    },
    Migration {
        version: "20251001_0002_create_notes",
        description: "Created notes table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS notes (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            content     TEXT NOT NULL,
            date        TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notes_date ON notes(date);
        "#,
    },
    Migration {
        version: "20251020_0003_single_running_timer",
        description: "Closed duplicate running timers and added one-running-timer-per-habit index",
        sql: r#"
        UPDATE timer_sessions
           SET is_running = 0,
               end_time = COALESCE(end_time, start_time)
         WHERE is_running = 1
           AND id NOT IN (
               SELECT MAX(id) FROM timer_sessions WHERE is_running = 1 GROUP BY habit_id
           );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_timer_sessions_one_running
            ON timer_sessions(habit_id) WHERE is_running = 1;
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded as applied, in application order.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
/// Returns the versions applied by this call.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        // schema change + marker commit together
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        ttlog(&tx, "migration_applied", m.version, m.description)?;
        tx.commit()?;

        applied.push(m.version);
    }

    Ok(applied)
}
