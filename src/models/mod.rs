pub mod dashboard;
pub mod habit;
pub mod habit_log;
pub mod note;
pub mod schedule;
pub mod timer_session;
