use crate::core::reconcile;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_closed_sessions, find_log, find_or_blank_log, find_running_session, insert_session,
    load_habit, sum_closed_durations, update_session, upsert_log,
};
use crate::errors::{AppError, AppResult};
use crate::models::timer_session::{TimerSession, TimerStatus, TodayTotal};
use crate::utils::time::{secs2readable, to_db};
use chrono::NaiveDateTime;
use rusqlite::Connection;

/// Timer lifecycle of a habit: Idle <-> Running.
///
/// Every mutating call runs as one immediate transaction. Elapsed time is
/// computed from `now`, never ticked in the background.
pub struct TimerLogic;

impl TimerLogic {
    /// Start a new session. A session already running is closed first.
    ///
    /// The implicitly closed session keeps its duration on the session row
    /// only; it is not added to the day log.
    pub fn start(pool: &mut DbPool, habit_id: i64, now: NaiveDateTime) -> AppResult<TimerSession> {
        pool.with_tx(|tx| {
            let habit = load_habit(tx, habit_id)?;
            if !habit.has_timer {
                return Err(AppError::TimerNotEnabled(habit_id));
            }

            if let Some(mut running) = find_running_session(tx, habit_id)? {
                running.close(now);
                update_session(tx, &running)?;
                ttlog(
                    tx,
                    "timer_stop",
                    &format!("habit {habit_id}"),
                    &format!(
                        "session {} closed by restart after {}",
                        running.id,
                        secs2readable(running.duration_seconds)
                    ),
                )?;
            }

            let mut session = TimerSession::start(habit_id, now);
            session.id = insert_session(tx, &session)?;

            ttlog(
                tx,
                "timer_start",
                &format!("habit {habit_id}"),
                &format!("session {} started at {}", session.id, to_db(&now)),
            )?;

            Ok(session)
        })
    }

    /// Stop the running session and add its duration to today's log.
    pub fn stop(pool: &mut DbPool, habit_id: i64, now: NaiveDateTime) -> AppResult<TimerSession> {
        pool.with_tx(|tx| {
            let mut session =
                find_running_session(tx, habit_id)?.ok_or(AppError::NoRunningTimer(habit_id))?;
            let habit = load_habit(tx, habit_id)?;

            session.close(now);
            update_session(tx, &session)?;

            let mut log = find_or_blank_log(tx, habit_id, &now.date())?;
            log.time_spent_seconds = log.time_spent_seconds.saturating_add(session.duration_seconds);
            log.id = upsert_log(tx, &log)?;

            reconcile::after_timer_stop(tx, &habit, &log)?;

            ttlog(
                tx,
                "timer_stop",
                &format!("habit {habit_id}"),
                &format!(
                    "session {} stopped after {}, day total {}",
                    session.id,
                    secs2readable(session.duration_seconds),
                    secs2readable(log.time_spent_seconds)
                ),
            )?;

            Ok(session)
        })
    }

    pub fn status(pool: &mut DbPool, habit_id: i64, now: NaiveDateTime) -> AppResult<TimerStatus> {
        let conn = &pool.conn;
        load_habit(conn, habit_id)?;

        let (current_session, total_time_today) = Self::live_total(conn, habit_id, now)?;

        Ok(TimerStatus {
            habit_id,
            is_running: current_session.is_some(),
            current_session,
            total_time_today,
        })
    }

    pub fn today_total(pool: &mut DbPool, habit_id: i64, now: NaiveDateTime) -> AppResult<TodayTotal> {
        let conn = &pool.conn;
        load_habit(conn, habit_id)?;

        let (_, total_seconds) = Self::live_total(conn, habit_id, now)?;
        Ok(TodayTotal {
            habit_id,
            total_seconds,
        })
    }

    /// Discard today's timing: closed sessions go, a running one restarts
    /// from `now`, and today's log time drops to zero.
    ///
    /// A session left running since an earlier day is moved to today's date.
    pub fn reset(pool: &mut DbPool, habit_id: i64, now: NaiveDateTime) -> AppResult<()> {
        pool.with_tx(|tx| {
            load_habit(tx, habit_id)?;
            let today = now.date();

            let removed = delete_closed_sessions(tx, habit_id, &today)?;

            if let Some(mut running) = find_running_session(tx, habit_id)? {
                running.date = today;
                running.start_time = now;
                running.duration_seconds = 0;
                update_session(tx, &running)?;
            }

            if let Some(mut log) = find_log(tx, habit_id, &today)? {
                log.time_spent_seconds = 0;
                upsert_log(tx, &log)?;
            }

            ttlog(
                tx,
                "timer_reset",
                &format!("habit {habit_id}"),
                &format!("{removed} closed session(s) removed for {today}"),
            )?;

            Ok(())
        })
    }

    /// Running session with its live elapsed time, plus today's total.
    fn live_total(
        conn: &Connection,
        habit_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<(Option<TimerSession>, i64)> {
        let closed = sum_closed_durations(conn, Some(habit_id), &now.date())?;

        let running = find_running_session(conn, habit_id)?.map(|mut s| {
            s.duration_seconds = s.elapsed_at(now);
            s
        });
        let live = running.as_ref().map_or(0, |s| s.duration_seconds);

        Ok((running, closed + live))
    }
}
