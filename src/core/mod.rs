pub mod backup;
pub mod dashboard;
pub mod habit;
pub mod log;
pub mod note;
pub mod reconcile;
pub mod schedule;
pub mod settings;
pub mod streak;
pub mod timer;

pub use backup::BackupLogic;
pub use dashboard::DashboardLogic;
pub use habit::HabitLogic;
pub use log::LogLogic;
pub use note::NoteLogic;
pub use settings::SettingsLogic;
pub use timer::TimerLogic;
