use super::schedule::ScheduleDays;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_repeatable: bool,
    pub has_timer: bool,
    /// None = no daily time budget; carryover/deficit never applies.
    pub estimated_duration_seconds: Option<i64>,
    pub schedule_days: ScheduleDays,
    /// Not listed for dates before this one.
    pub start_date: Option<NaiveDate>,
    pub is_archived: bool,
    /// Soft-delete flag, independent from `is_archived`.
    pub is_active: bool,
    pub created_at: String,
}

impl Habit {
    /// Whether the habit exists (by start date) on `date`.
    pub fn has_started_by(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| start <= date)
    }

    /// Estimate usable for time accounting (a zero budget never accrues).
    pub fn time_budget(&self) -> Option<i64> {
        self.estimated_duration_seconds.filter(|s| *s > 0)
    }
}

/// Fields for a new habit.
#[derive(Debug, Clone)]
pub struct HabitInput {
    pub name: String,
    pub description: Option<String>,
    pub is_repeatable: bool,
    pub has_timer: bool,
    pub estimated_duration_seconds: Option<i64>,
    pub schedule_days: Vec<u8>,
    pub start_date: Option<NaiveDate>,
}

impl HabitInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_repeatable: true,
            has_timer: false,
            estimated_duration_seconds: None,
            schedule_days: Vec::new(),
            start_date: None,
        }
    }

    pub fn with_timer(mut self, estimated_seconds: Option<i64>) -> Self {
        self.has_timer = true;
        self.estimated_duration_seconds = estimated_seconds;
        self
    }
}

/// Partial update. `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_repeatable: Option<bool>,
    pub has_timer: Option<bool>,
    pub estimated_duration_seconds: Option<Option<i64>>,
    pub schedule_days: Option<Vec<u8>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
    pub is_archived: Option<bool>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_repeatable.is_none()
            && self.has_timer.is_none()
            && self.estimated_duration_seconds.is_none()
            && self.schedule_days.is_none()
            && self.start_date.is_none()
            && self.is_active.is_none()
            && self.is_archived.is_none()
    }
}

/// A habit together with its stats for one day.
#[derive(Debug, Clone, Serialize)]
pub struct HabitWithStats {
    #[serde(flatten)]
    pub habit: Habit,
    pub completed_today: bool,
    pub time_spent_today: i64,
    pub carryover_seconds: i64,
    pub deficit_seconds: i64,
    pub streak: i64,
    pub is_scheduled_today: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitStats {
    pub habit_id: i64,
    pub habit_name: String,
    pub period_days: i64,
    pub completed_days: i64,
    /// Percentage with one decimal.
    pub completion_rate: f64,
    pub total_time_seconds: i64,
    pub current_streak: i64,
    pub logs: Vec<super::habit_log::HabitLog>,
}
