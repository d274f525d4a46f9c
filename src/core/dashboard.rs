use crate::core::streak::all_habits_streak;
use crate::db::pool::DbPool;
use crate::db::queries::{count_active_habits, count_completed_on, count_notes_on, sum_closed_durations};
use crate::errors::AppResult;
use crate::models::dashboard::{DailyProgress, DashboardStats};
use crate::utils::date::check_period_days;
use crate::utils::formatting::percentage;
use chrono::{Duration, NaiveDate};

/// Cross-habit summaries.
pub struct DashboardLogic;

impl DashboardLogic {
    pub fn stats(pool: &mut DbPool, today: NaiveDate) -> AppResult<DashboardStats> {
        let conn = &pool.conn;

        let total_habits = count_active_habits(conn)?;
        let completed_today = count_completed_on(conn, &today)?;

        Ok(DashboardStats {
            total_habits,
            completed_today,
            completion_percentage: percentage(completed_today, total_habits).min(100.0),
            total_time_today: sum_closed_durations(conn, None, &today)?,
            current_streak: all_habits_streak(conn, total_habits, today)?,
            notes_today: count_notes_on(conn, &today)?,
        })
    }

    /// One entry per day for the last `days` days, oldest first, ending today.
    pub fn progress(pool: &mut DbPool, days: i64, today: NaiveDate) -> AppResult<Vec<DailyProgress>> {
        let days = check_period_days(days)?;
        let conn = &pool.conn;
        let total = count_active_habits(conn)?;

        let mut out = Vec::new();
        for offset in (0..days).rev() {
            let date = today - Duration::days(offset);
            let completed = count_completed_on(conn, &date)?;
            out.push(DailyProgress {
                date,
                completed,
                total,
                percentage: percentage(completed, total).min(100.0),
            });
        }
        Ok(out)
    }
}
