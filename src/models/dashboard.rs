use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_habits: i64,
    pub completed_today: i64,
    pub completion_percentage: f64,
    pub total_time_today: i64,
    pub current_streak: i64,
    pub notes_today: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub completed: i64,
    pub total: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub carryover_enabled: bool,
}
