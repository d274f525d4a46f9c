use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSession {
    pub id: i64,
    pub habit_id: i64,
    /// Day the session started.
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// 0 while running.
    pub duration_seconds: i64,
    pub is_running: bool,
}

impl TimerSession {
    pub fn start(habit_id: i64, now: NaiveDateTime) -> Self {
        Self {
            id: 0,
            habit_id,
            date: now.date(),
            start_time: now,
            end_time: None,
            duration_seconds: 0,
            is_running: true,
        }
    }

    /// Whole seconds since `start_time`, never negative.
    pub fn elapsed_at(&self, now: NaiveDateTime) -> i64 {
        (now - self.start_time).num_seconds().max(0)
    }

    /// Running → stopped at `now`.
    pub fn close(&mut self, now: NaiveDateTime) {
        self.end_time = Some(now);
        self.duration_seconds = self.elapsed_at(now);
        self.is_running = false;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerStatus {
    pub habit_id: i64,
    pub is_running: bool,
    /// Running session with its live elapsed time in `duration_seconds`.
    pub current_session: Option<TimerSession>,
    pub total_time_today: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TodayTotal {
    pub habit_id: i64,
    pub total_seconds: i64,
}
