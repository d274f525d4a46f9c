use crate::models::habit_log::HabitLog;
use serde::Serialize;

/// One flat row per habit and day.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HabitLogExport {
    pub date: String,
    pub habit_id: i64,
    pub habit_name: String,
    pub completed: bool,
    pub time_spent_seconds: i64,
    pub carryover_seconds: i64,
    pub deficit_seconds: i64,
}

impl HabitLogExport {
    pub fn from_log(log: &HabitLog, habit_name: &str) -> Self {
        Self {
            date: crate::utils::date::to_db(&log.date),
            habit_id: log.habit_id,
            habit_name: habit_name.to_string(),
            completed: log.completed,
            time_spent_seconds: log.time_spent_seconds,
            carryover_seconds: log.carryover_seconds,
            deficit_seconds: log.deficit_seconds,
        }
    }
}
