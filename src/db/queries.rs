use crate::errors::{AppError, AppResult};
use crate::models::habit::Habit;
use crate::models::habit_log::HabitLog;
use crate::models::note::Note;
use crate::models::schedule::ScheduleDays;
use crate::models::timer_session::TimerSession;
use crate::utils::{date, time};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn get_date(row: &Row, col: &str) -> Result<NaiveDate> {
    let raw: String = row.get(col)?;
    let idx = row.as_ref().column_index(col)?;
    date::parse_date(&raw).ok_or_else(|| conversion_error(idx, AppError::InvalidDate(raw)))
}

fn get_opt_date(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let idx = row.as_ref().column_index(col)?;
            date::parse_date(&s)
                .map(Some)
                .ok_or_else(|| conversion_error(idx, AppError::InvalidDate(s)))
        }
    }
}

fn get_ts(row: &Row, col: &str) -> Result<NaiveDateTime> {
    let raw: String = row.get(col)?;
    let idx = row.as_ref().column_index(col)?;
    time::parse_ts(&raw).ok_or_else(|| {
        conversion_error(idx, AppError::InvalidInput(format!("invalid timestamp '{raw}'")))
    })
}

fn get_opt_ts(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) => {
            let idx = row.as_ref().column_index(col)?;
            time::parse_ts(&s).map(Some).ok_or_else(|| {
                conversion_error(idx, AppError::InvalidInput(format!("invalid timestamp '{s}'")))
            })
        }
    }
}

// ---------------------------------------------------------------------------
// habits
// ---------------------------------------------------------------------------

pub fn map_habit(row: &Row) -> Result<Habit> {
    let schedule_raw: Option<String> = row.get("schedule_days")?;

    Ok(Habit {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        is_repeatable: row.get("is_repeatable")?,
        has_timer: row.get("has_timer")?,
        estimated_duration_seconds: row.get("estimated_duration_seconds")?,
        schedule_days: ScheduleDays::from_db(schedule_raw.as_deref()),
        start_date: get_opt_date(row, "start_date")?,
        is_archived: row.get("is_archived")?,
        is_active: row.get("is_active")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a habit and return its id. `habit.id` is ignored.
pub fn insert_habit(conn: &Connection, habit: &Habit) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO habits (name, description, is_repeatable, has_timer,
                             estimated_duration_seconds, schedule_days, start_date,
                             is_archived, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            habit.name,
            habit.description,
            habit.is_repeatable,
            habit.has_timer,
            habit.estimated_duration_seconds,
            habit.schedule_days.to_db(),
            habit.start_date.as_ref().map(date::to_db),
            habit.is_archived,
            habit.is_active,
            habit.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a habit (all fields except id and created_at)
pub fn update_habit(conn: &Connection, habit: &Habit) -> AppResult<()> {
    conn.execute(
        "UPDATE habits
         SET name = ?1, description = ?2, is_repeatable = ?3, has_timer = ?4,
             estimated_duration_seconds = ?5, schedule_days = ?6, start_date = ?7,
             is_archived = ?8, is_active = ?9
         WHERE id = ?10",
        params![
            habit.name,
            habit.description,
            habit.is_repeatable,
            habit.has_timer,
            habit.estimated_duration_seconds,
            habit.schedule_days.to_db(),
            habit.start_date.as_ref().map(date::to_db),
            habit.is_archived,
            habit.is_active,
            habit.id,
        ],
    )?;
    Ok(())
}

pub fn find_habit(conn: &Connection, id: i64) -> AppResult<Option<Habit>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM habits WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_habit).optional()?)
}

/// Like `find_habit`, but absent → `NotFound`.
pub fn load_habit(conn: &Connection, id: i64) -> AppResult<Habit> {
    find_habit(conn, id)?.ok_or_else(|| AppError::habit_not_found(id))
}

/// Active habits, ordered by id.
pub fn load_active_habits(conn: &Connection, include_archived: bool) -> AppResult<Vec<Habit>> {
    let sql = if include_archived {
        "SELECT * FROM habits WHERE is_active = 1 ORDER BY id ASC"
    } else {
        "SELECT * FROM habits WHERE is_active = 1 AND is_archived = 0 ORDER BY id ASC"
    };

    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map([], map_habit)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_active_habits(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM habits WHERE is_active = 1",
        [],
        |row| row.get(0),
    )?)
}

/// Hard delete; logs and sessions go with it (ON DELETE CASCADE).
pub fn delete_habit(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM habits WHERE id = ?1", [id])?)
}

// ---------------------------------------------------------------------------
// habit_logs
// ---------------------------------------------------------------------------

pub fn map_log(row: &Row) -> Result<HabitLog> {
    Ok(HabitLog {
        id: row.get("id")?,
        habit_id: row.get("habit_id")?,
        date: get_date(row, "date")?,
        completed: row.get("completed")?,
        time_spent_seconds: row.get("time_spent_seconds")?,
        carryover_seconds: row.get("carryover_seconds")?,
        deficit_seconds: row.get("deficit_seconds")?,
        created_at: row.get("created_at")?,
    })
}

pub fn find_log(conn: &Connection, habit_id: i64, day: &NaiveDate) -> AppResult<Option<HabitLog>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM habit_logs WHERE habit_id = ?1 AND date = ?2")?;
    Ok(stmt
        .query_row(params![habit_id, date::to_db(day)], map_log)
        .optional()?)
}

/// Existing log for (habit, day), or a blank unsaved one.
pub fn find_or_blank_log(conn: &Connection, habit_id: i64, day: &NaiveDate) -> AppResult<HabitLog> {
    Ok(find_log(conn, habit_id, day)?.unwrap_or_else(|| HabitLog::blank(habit_id, *day)))
}

/// Insert or update the log keyed by (habit_id, date). Returns the row id.
pub fn upsert_log(conn: &Connection, log: &HabitLog) -> AppResult<i64> {
    let id: i64 = conn.query_row(
        "INSERT INTO habit_logs (habit_id, date, completed, time_spent_seconds,
                                 carryover_seconds, deficit_seconds, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(habit_id, date) DO UPDATE SET
             completed = excluded.completed,
             time_spent_seconds = excluded.time_spent_seconds,
             carryover_seconds = excluded.carryover_seconds,
             deficit_seconds = excluded.deficit_seconds
         RETURNING id",
        params![
            log.habit_id,
            date::to_db(&log.date),
            log.completed,
            log.time_spent_seconds,
            log.carryover_seconds,
            log.deficit_seconds,
            log.created_at,
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Logs of one habit with `date >= since`, newest first.
pub fn load_logs_since(conn: &Connection, habit_id: i64, since: &NaiveDate) -> AppResult<Vec<HabitLog>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM habit_logs
         WHERE habit_id = ?1 AND date >= ?2
         ORDER BY date DESC",
    )?;
    let rows = stmt.query_map(params![habit_id, date::to_db(since)], map_log)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Logs joined with habit name, optionally bounded, oldest first.
pub fn load_logs_with_names(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<(HabitLog, String)>> {
    let (start, end) = match bounds {
        Some((s, e)) => (date::to_db(&s), date::to_db(&e)),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT l.*, h.name AS habit_name
         FROM habit_logs l
         JOIN habits h ON h.id = l.habit_id
         WHERE l.date >= ?1 AND l.date <= ?2
         ORDER BY l.date ASC, l.habit_id ASC",
    )?;
    let rows = stmt.query_map(params![start, end], |row| {
        Ok((map_log(row)?, row.get::<_, String>("habit_name")?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_completed_on(conn: &Connection, day: &NaiveDate) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM habit_logs WHERE date = ?1 AND completed = 1",
        [date::to_db(day)],
        |row| row.get(0),
    )?)
}

// ---------------------------------------------------------------------------
// timer_sessions
// ---------------------------------------------------------------------------

pub fn map_session(row: &Row) -> Result<TimerSession> {
    Ok(TimerSession {
        id: row.get("id")?,
        habit_id: row.get("habit_id")?,
        date: get_date(row, "date")?,
        start_time: get_ts(row, "start_time")?,
        end_time: get_opt_ts(row, "end_time")?,
        duration_seconds: row.get("duration_seconds")?,
        is_running: row.get("is_running")?,
    })
}

pub fn find_running_session(conn: &Connection, habit_id: i64) -> AppResult<Option<TimerSession>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM timer_sessions WHERE habit_id = ?1 AND is_running = 1 LIMIT 1",
    )?;
    Ok(stmt.query_row([habit_id], map_session).optional()?)
}

pub fn insert_session(conn: &Connection, s: &TimerSession) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timer_sessions (habit_id, date, start_time, end_time, duration_seconds, is_running)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            s.habit_id,
            date::to_db(&s.date),
            time::to_db(&s.start_time),
            s.end_time.as_ref().map(time::to_db),
            s.duration_seconds,
            s.is_running,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_session(conn: &Connection, s: &TimerSession) -> AppResult<()> {
    conn.execute(
        "UPDATE timer_sessions
         SET date = ?1, start_time = ?2, end_time = ?3, duration_seconds = ?4, is_running = ?5
         WHERE id = ?6",
        params![
            date::to_db(&s.date),
            time::to_db(&s.start_time),
            s.end_time.as_ref().map(time::to_db),
            s.duration_seconds,
            s.is_running,
            s.id,
        ],
    )?;
    Ok(())
}

/// All sessions of a habit for a day, oldest first.
pub fn load_sessions_on(conn: &Connection, habit_id: i64, day: &NaiveDate) -> AppResult<Vec<TimerSession>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM timer_sessions WHERE habit_id = ?1 AND date = ?2 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![habit_id, date::to_db(day)], map_session)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_running_sessions(conn: &Connection, habit_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM timer_sessions WHERE habit_id = ?1 AND is_running = 1",
        [habit_id],
        |row| row.get(0),
    )?)
}

pub fn delete_closed_sessions(conn: &Connection, habit_id: i64, day: &NaiveDate) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM timer_sessions WHERE habit_id = ?1 AND date = ?2 AND is_running = 0",
        params![habit_id, date::to_db(day)],
    )?)
}

/// Sum of closed session durations on `day`; all habits when `habit_id` is None.
pub fn sum_closed_durations(conn: &Connection, habit_id: Option<i64>, day: &NaiveDate) -> AppResult<i64> {
    let total: Option<i64> = match habit_id {
        Some(id) => conn.query_row(
            "SELECT SUM(duration_seconds) FROM timer_sessions
             WHERE habit_id = ?1 AND date = ?2 AND is_running = 0",
            params![id, date::to_db(day)],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT SUM(duration_seconds) FROM timer_sessions
             WHERE date = ?1 AND is_running = 0",
            [date::to_db(day)],
            |row| row.get(0),
        )?,
    };
    Ok(total.unwrap_or(0))
}

// ---------------------------------------------------------------------------
// notes
// ---------------------------------------------------------------------------

pub fn map_note(row: &Row) -> Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        content: row.get("content")?,
        date: get_date(row, "date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_note(conn: &Connection, content: &str, day: &NaiveDate) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO notes (content, date, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        params![content, date::to_db(day), now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_note(conn: &Connection, id: i64) -> AppResult<Option<Note>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM notes WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_note).optional()?)
}

pub fn update_note(conn: &Connection, note: &Note) -> AppResult<()> {
    conn.execute(
        "UPDATE notes SET content = ?1, date = ?2, updated_at = ?3 WHERE id = ?4",
        params![note.content, date::to_db(&note.date), note.updated_at, note.id],
    )?;
    Ok(())
}

pub fn delete_note(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM notes WHERE id = ?1", [id])?)
}

/// Notes within optional bounds, newest date first, then newest created.
pub fn load_notes(
    conn: &Connection,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> AppResult<Vec<Note>> {
    let start = start.map(|d| date::to_db(&d)).unwrap_or_else(|| "0000-01-01".into());
    let end = end.map(|d| date::to_db(&d)).unwrap_or_else(|| "9999-12-31".into());

    let mut stmt = conn.prepare_cached(
        "SELECT * FROM notes
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date DESC, created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![start, end], map_note)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_notes_on(conn: &Connection, day: &NaiveDate) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM notes WHERE date = ?1",
        [date::to_db(day)],
        |row| row.get(0),
    )?)
}

// ---------------------------------------------------------------------------
// app_settings
// ---------------------------------------------------------------------------

pub fn get_setting(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM app_settings WHERE key = ?1")?;
    let value: Option<Option<String>> = stmt.query_row([key], |row| row.get(0)).optional()?;
    Ok(value.flatten())
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO app_settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// full reset
// ---------------------------------------------------------------------------

/// Delete every user record. The internal `log` table is kept.
pub fn reset_all_data(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "DELETE FROM timer_sessions;
         DELETE FROM habit_logs;
         DELETE FROM habits;
         DELETE FROM notes;
         DELETE FROM app_settings;",
    )?;
    Ok(())
}
