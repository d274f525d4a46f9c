use crate::db::queries::{count_completed_on, find_log};
use crate::errors::AppResult;
use crate::utils::date::prev_day;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Consecutive completed days for one habit, walking back from `as_of`.
///
/// Stops at the first day whose log is missing or not completed, so the
/// result is 0 when `as_of` itself is not completed.
pub fn streak(conn: &Connection, habit_id: i64, as_of: NaiveDate) -> AppResult<i64> {
    let mut count = 0;
    let mut day = as_of;

    while let Some(log) = find_log(conn, habit_id, &day)? {
        if !log.completed {
            break;
        }
        count += 1;
        day = prev_day(day);
    }

    Ok(count)
}

/// Consecutive days, back from `as_of`, on which completed logs covered
/// every active habit. 0 when there are no active habits.
pub fn all_habits_streak(conn: &Connection, active_habits: i64, as_of: NaiveDate) -> AppResult<i64> {
    if active_habits <= 0 {
        return Ok(0);
    }

    let mut count = 0;
    let mut day = as_of;

    while count_completed_on(conn, &day)? >= active_habits {
        count += 1;
        day = prev_day(day);
    }

    Ok(count)
}
