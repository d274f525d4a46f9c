//! Carryover / deficit reconciliation between adjacent days.
//!
//! Two policies live here:
//! - [`after_timer_stop`]: runs when a timer stop has just updated a day's
//!   total. It may retroactively close yesterday and seeds tomorrow.
//! - [`after_explicit_set`]: runs when a day's completion is set by date.
//!   It only adjusts tomorrow.
//!
//! Both are silent no-ops while the `carryover_enabled` setting is off or the
//! habit has no positive time estimate. Storage errors propagate so the
//! caller's transaction rolls back.

use crate::core::settings::SettingsLogic;
use crate::db::log::ttlog;
use crate::db::queries::{find_log, find_or_blank_log, upsert_log};
use crate::errors::AppResult;
use crate::models::habit::Habit;
use crate::models::habit_log::HabitLog;
use crate::utils::date::{next_day, prev_day};
use crate::utils::time::secs2readable;
use rusqlite::Connection;

/// What a day's total means for the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextDay {
    /// Spent more than the estimate: the excess is gifted forward.
    Carryover(i64),
    /// Spent exactly the estimate: nothing to carry.
    Neutral,
    /// Spent less than the estimate: the shortfall is owed.
    Deficit(i64),
}

pub fn balance(time_spent: i64, estimate: i64) -> NextDay {
    match time_spent.cmp(&estimate) {
        std::cmp::Ordering::Greater => NextDay::Carryover(time_spent - estimate),
        std::cmp::Ordering::Equal => NextDay::Neutral,
        std::cmp::Ordering::Less => NextDay::Deficit(estimate - time_spent),
    }
}

/// True when `today_spent` pays off the deficit carried by the previous day.
pub fn pays_off(previous: &HabitLog, today_spent: i64, estimate: i64) -> bool {
    !previous.completed
        && previous.deficit_seconds > 0
        && previous.time_spent_seconds.saturating_add(today_spent) >= estimate
}

/// Estimate to reconcile against, or None when reconciliation is off.
fn active_budget(conn: &Connection, habit: &Habit) -> AppResult<Option<i64>> {
    if !SettingsLogic::carryover_enabled(conn)? {
        return Ok(None);
    }
    Ok(habit.time_budget())
}

fn audit(conn: &Connection, habit: &Habit, log: &HabitLog, what: &str) -> AppResult<()> {
    ttlog(
        conn,
        "reconcile",
        &format!("habit {} {}", habit.id, log.date),
        what,
    )
}

/// Timer-stop policy for `day_log`, whose `time_spent_seconds` was just updated.
pub fn after_timer_stop(conn: &Connection, habit: &Habit, day_log: &HabitLog) -> AppResult<()> {
    let Some(estimate) = active_budget(conn, habit)? else {
        return Ok(());
    };
    let day = day_log.date;
    let spent = day_log.time_spent_seconds;

    // yesterday's debt paid by today's work
    if let Some(mut previous) = find_log(conn, habit.id, &prev_day(day))?
        && pays_off(&previous, spent, estimate)
    {
        previous.completed = true;
        previous.deficit_seconds = 0;
        upsert_log(conn, &previous)?;
        audit(conn, habit, &previous, "deficit paid off, day marked completed")?;
    }

    let tomorrow = next_day(day);
    match balance(spent, estimate) {
        NextDay::Neutral => {}
        NextDay::Carryover(excess) => {
            let mut next = find_or_blank_log(conn, habit.id, &tomorrow)?;
            next.set_carryover(excess);
            upsert_log(conn, &next)?;
            audit(conn, habit, &next, &format!("carryover {}", secs2readable(excess)))?;
        }
        NextDay::Deficit(short) => {
            let mut next = find_or_blank_log(conn, habit.id, &tomorrow)?;
            next.set_deficit(short);
            upsert_log(conn, &next)?;
            audit(conn, habit, &next, &format!("deficit {}", secs2readable(short)))?;
        }
    }

    Ok(())
}

/// Explicit set-by-date policy. Applies only to timed habits, and like the
/// timer-stop policy only while `carryover_enabled` is on.
pub fn after_explicit_set(conn: &Connection, habit: &Habit, day_log: &HabitLog) -> AppResult<()> {
    if !habit.has_timer {
        return Ok(());
    }
    let Some(estimate) = active_budget(conn, habit)? else {
        return Ok(());
    };
    let tomorrow = next_day(day_log.date);
    let spent = day_log.time_spent_seconds;

    if day_log.completed {
        let existing = find_log(conn, habit.id, &tomorrow)?;
        let excess = spent - estimate;

        if excess > 0 {
            let mut next = existing.unwrap_or_else(|| HabitLog::blank(habit.id, tomorrow));
            next.set_carryover(excess);
            upsert_log(conn, &next)?;
            audit(conn, habit, &next, &format!("carryover {}", secs2readable(excess)))?;
        } else if let Some(mut next) = existing
            && next.deficit_seconds > 0
        {
            next.deficit_seconds = 0;
            upsert_log(conn, &next)?;
            audit(conn, habit, &next, "deficit cleared")?;
        }
    } else {
        let short = (estimate - spent).max(0);
        let mut next = find_or_blank_log(conn, habit.id, &tomorrow)?;
        next.set_deficit(short);
        upsert_log(conn, &next)?;
        audit(conn, habit, &next, &format!("deficit {}", secs2readable(short)))?;
    }

    Ok(())
}
