use crate::core::reconcile;
use crate::core::schedule::is_due;
use crate::core::streak::streak;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_habit, find_log, find_or_blank_log, insert_habit, load_active_habits, load_habit,
    load_logs_since, update_habit, upsert_log,
};
use crate::errors::{AppError, AppResult};
use crate::models::habit::{Habit, HabitInput, HabitPatch, HabitStats, HabitWithStats};
use crate::models::habit_log::{DayCompletion, HabitDayStatus, HabitLog};
use crate::models::schedule::ScheduleDays;
use crate::utils::date::{check_period_days, parse_date_arg};
use crate::utils::formatting::percentage;
use crate::utils::time::DAY_SECS;
use chrono::{Duration, Local, NaiveDate};
use rusqlite::Connection;

/// High-level business logic for habits and their daily logs.
pub struct HabitLogic;

fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("habit name cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_estimate(estimate: Option<i64>) -> AppResult<Option<i64>> {
    match estimate {
        Some(s) if s < 0 => Err(AppError::InvalidInput(format!(
            "estimated duration cannot be negative ({s})"
        ))),
        other => Ok(other),
    }
}

/// Time logged for one day: between zero and a full day.
fn validate_time_spent(seconds: i64) -> AppResult<()> {
    if !(0..=DAY_SECS).contains(&seconds) {
        return Err(AppError::InvalidInput(format!(
            "time spent must be between 0 and {DAY_SECS} seconds (got {seconds})"
        )));
    }
    Ok(())
}

fn validate_schedule(days: &[u8]) -> AppResult<ScheduleDays> {
    ScheduleDays::from_input(days).map_err(AppError::InvalidInput)
}

fn with_stats(conn: &Connection, habit: Habit, today: NaiveDate) -> AppResult<HabitWithStats> {
    let log = find_log(conn, habit.id, &today)?;
    let current = streak(conn, habit.id, today)?;
    let scheduled = is_due(&habit, today);

    Ok(HabitWithStats {
        completed_today: log.as_ref().is_some_and(|l| l.completed),
        time_spent_today: log.as_ref().map_or(0, |l| l.time_spent_seconds),
        carryover_seconds: log.as_ref().map_or(0, |l| l.carryover_seconds),
        deficit_seconds: log.as_ref().map_or(0, |l| l.deficit_seconds),
        streak: current,
        is_scheduled_today: scheduled,
        habit,
    })
}

impl HabitLogic {
    pub fn create(pool: &mut DbPool, input: HabitInput) -> AppResult<Habit> {
        let mut habit = Habit {
            id: 0,
            name: validate_name(&input.name)?,
            description: input.description.filter(|d| !d.trim().is_empty()),
            is_repeatable: input.is_repeatable,
            has_timer: input.has_timer,
            estimated_duration_seconds: validate_estimate(input.estimated_duration_seconds)?,
            schedule_days: validate_schedule(&input.schedule_days)?,
            start_date: input.start_date,
            is_archived: false,
            is_active: true,
            created_at: Local::now().to_rfc3339(),
        };

        pool.with_tx(|tx| {
            habit.id = insert_habit(tx, &habit)?;
            ttlog(
                tx,
                "habit_add",
                &format!("habit {}", habit.id),
                &format!("created '{}'", habit.name),
            )?;
            Ok(())
        })?;

        Ok(habit)
    }

    /// Active habits that have started by `today`, each with today's stats.
    pub fn list(
        pool: &mut DbPool,
        include_archived: bool,
        today: NaiveDate,
    ) -> AppResult<Vec<HabitWithStats>> {
        let conn = &pool.conn;
        load_active_habits(conn, include_archived)?
            .into_iter()
            .filter(|h| h.has_started_by(today))
            .map(|h| with_stats(conn, h, today))
            .collect()
    }

    pub fn get(pool: &mut DbPool, id: i64, today: NaiveDate) -> AppResult<HabitWithStats> {
        let conn = &pool.conn;
        let habit = load_habit(conn, id)?;
        with_stats(conn, habit, today)
    }

    pub fn update(pool: &mut DbPool, id: i64, patch: HabitPatch) -> AppResult<Habit> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput("nothing to update".into()));
        }

        pool.with_tx(|tx| {
            let mut habit = load_habit(tx, id)?;

            if let Some(name) = &patch.name {
                habit.name = validate_name(name)?;
            }
            if let Some(description) = &patch.description {
                habit.description = description.clone().filter(|d| !d.trim().is_empty());
            }
            if let Some(v) = patch.is_repeatable {
                habit.is_repeatable = v;
            }
            if let Some(v) = patch.has_timer {
                habit.has_timer = v;
            }
            if let Some(estimate) = patch.estimated_duration_seconds {
                habit.estimated_duration_seconds = validate_estimate(estimate)?;
            }
            if let Some(days) = &patch.schedule_days {
                habit.schedule_days = validate_schedule(days)?;
            }
            if let Some(start) = patch.start_date {
                habit.start_date = start;
            }
            if let Some(v) = patch.is_active {
                habit.is_active = v;
            }
            if let Some(v) = patch.is_archived {
                habit.is_archived = v;
            }

            update_habit(tx, &habit)?;
            ttlog(tx, "habit_edit", &format!("habit {id}"), "updated")?;
            Ok(habit)
        })
    }

    /// Soft delete: the habit disappears from listings, its history stays.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        Self::set_flags(pool, id, Some(false), None, "habit_del")
    }

    /// Hard delete, including every log and timer session of the habit.
    pub fn purge(pool: &mut DbPool, id: i64) -> AppResult<()> {
        pool.with_tx(|tx| {
            let habit = load_habit(tx, id)?;
            delete_habit(tx, id)?;
            ttlog(
                tx,
                "habit_purge",
                &format!("habit {id}"),
                &format!("purged '{}' with its history", habit.name),
            )?;
            Ok(())
        })
    }

    pub fn archive(pool: &mut DbPool, id: i64) -> AppResult<()> {
        Self::set_flags(pool, id, None, Some(true), "habit_archive")
    }

    pub fn unarchive(pool: &mut DbPool, id: i64) -> AppResult<()> {
        Self::set_flags(pool, id, None, Some(false), "habit_unarchive")
    }

    fn set_flags(
        pool: &mut DbPool,
        id: i64,
        active: Option<bool>,
        archived: Option<bool>,
        operation: &str,
    ) -> AppResult<()> {
        pool.with_tx(|tx| {
            let mut habit = load_habit(tx, id)?;
            if let Some(v) = active {
                habit.is_active = v;
            }
            if let Some(v) = archived {
                habit.is_archived = v;
            }
            update_habit(tx, &habit)?;
            ttlog(tx, operation, &format!("habit {id}"), &habit.name)?;
            Ok(())
        })
    }

    /// Overwrite today's completion and time. No reconciliation.
    pub fn log_today(
        pool: &mut DbPool,
        id: i64,
        completed: bool,
        time_spent_seconds: i64,
        today: NaiveDate,
    ) -> AppResult<HabitLog> {
        validate_time_spent(time_spent_seconds)?;

        pool.with_tx(|tx| {
            load_habit(tx, id)?;

            let mut log = find_or_blank_log(tx, id, &today)?;
            log.completed = completed;
            log.time_spent_seconds = time_spent_seconds;
            log.id = upsert_log(tx, &log)?;

            ttlog(
                tx,
                "habit_log",
                &format!("habit {id} {today}"),
                &format!("completed={completed} time={time_spent_seconds}s"),
            )?;
            Ok(log)
        })
    }

    /// Logs dated `today - days` or later, newest first.
    pub fn logs(pool: &mut DbPool, id: i64, days: i64, today: NaiveDate) -> AppResult<Vec<HabitLog>> {
        let days = check_period_days(days)?;
        let conn = &pool.conn;
        load_habit(conn, id)?;
        load_logs_since(conn, id, &(today - Duration::days(days)))
    }

    pub fn stats(pool: &mut DbPool, id: i64, days: i64, today: NaiveDate) -> AppResult<HabitStats> {
        let days = check_period_days(days)?;
        let conn = &pool.conn;
        let habit = load_habit(conn, id)?;

        let logs = load_logs_since(conn, id, &(today - Duration::days(days)))?;
        let completed_days = logs.iter().filter(|l| l.completed).count() as i64;
        let total_time_seconds = logs.iter().map(|l| l.time_spent_seconds).sum();

        Ok(HabitStats {
            habit_id: id,
            habit_name: habit.name,
            period_days: days,
            completed_days,
            completion_rate: percentage(completed_days, days),
            total_time_seconds,
            current_streak: streak(conn, id, today)?,
            logs,
        })
    }

    /// Status of every listed habit on `date` (`YYYY-MM-DD`).
    pub fn habits_by_date(pool: &mut DbPool, date: &str) -> AppResult<Vec<HabitDayStatus>> {
        let day = parse_date_arg(date)?;
        let conn = &pool.conn;

        let mut out = Vec::new();
        for habit in load_active_habits(conn, false)? {
            if !habit.has_started_by(day) {
                continue;
            }
            let log = find_log(conn, habit.id, &day)?;
            out.push(HabitDayStatus {
                habit_id: habit.id,
                is_scheduled: is_due(&habit, day),
                completed: log.as_ref().is_some_and(|l| l.completed),
                time_spent_seconds: log.as_ref().map_or(0, |l| l.time_spent_seconds),
                carryover_seconds: log.as_ref().map_or(0, |l| l.carryover_seconds),
                deficit_seconds: log.as_ref().map_or(0, |l| l.deficit_seconds),
                has_timer: habit.has_timer,
                estimated_duration_seconds: habit.estimated_duration_seconds,
                habit_name: habit.name,
            });
        }
        Ok(out)
    }

    /// Set completion for one date and reconcile the following day.
    ///
    /// `time_spent` overwrites the stored time when given.
    pub fn set_day_completion(
        pool: &mut DbPool,
        id: i64,
        date: &str,
        completed: bool,
        time_spent: Option<i64>,
    ) -> AppResult<DayCompletion> {
        let day = parse_date_arg(date)?;
        if let Some(t) = time_spent {
            validate_time_spent(t)?;
        }

        pool.with_tx(|tx| {
            let habit = load_habit(tx, id)?;

            let mut log = find_or_blank_log(tx, id, &day)?;
            log.completed = completed;
            if let Some(t) = time_spent {
                log.time_spent_seconds = t;
            }
            log.id = upsert_log(tx, &log)?;

            reconcile::after_explicit_set(tx, &habit, &log)?;

            ttlog(
                tx,
                "day_set",
                &format!("habit {id} {day}"),
                &format!("completed={completed} time={}s", log.time_spent_seconds),
            )?;

            Ok(DayCompletion {
                habit_id: id,
                date: day,
                completed: log.completed,
                time_spent_seconds: log.time_spent_seconds,
            })
        })
    }
}
