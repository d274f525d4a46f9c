use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One row per (habit, date); `UNIQUE(habit_id, date)` in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitLog {
    pub id: i64, // 0 until stored
    pub habit_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
    pub time_spent_seconds: i64,
    /// Excess gifted by the previous day.
    pub carryover_seconds: i64,
    /// Shortfall owed from the previous day.
    pub deficit_seconds: i64,
    pub created_at: String,
}

impl HabitLog {
    /// Fresh, not-yet-stored log: not completed, no time, no adjustments.
    pub fn blank(habit_id: i64, date: NaiveDate) -> Self {
        Self {
            id: 0,
            habit_id,
            date,
            completed: false,
            time_spent_seconds: 0,
            carryover_seconds: 0,
            deficit_seconds: 0,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn set_carryover(&mut self, seconds: i64) {
        self.carryover_seconds = seconds.max(0);
        self.deficit_seconds = 0;
    }

    pub fn set_deficit(&mut self, seconds: i64) {
        self.deficit_seconds = seconds.max(0);
        self.carryover_seconds = 0;
    }
}

/// Status of one habit on one calendar date.
#[derive(Debug, Clone, Serialize)]
pub struct HabitDayStatus {
    pub habit_id: i64,
    pub habit_name: String,
    pub has_timer: bool,
    pub estimated_duration_seconds: Option<i64>,
    pub is_scheduled: bool,
    pub completed: bool,
    pub time_spent_seconds: i64,
    pub carryover_seconds: i64,
    pub deficit_seconds: i64,
}

/// Result of an explicit per-date completion update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCompletion {
    pub habit_id: i64,
    pub date: NaiveDate,
    pub completed: bool,
    pub time_spent_seconds: i64,
}
