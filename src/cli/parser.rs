use crate::export::ExportFormat;
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for rHabitLogger
/// CLI application to track daily habits, timers and notes with SQLite
#[derive(Parser)]
#[command(
    name = "rhabitlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A habit tracking CLI: daily habits, timers with carryover/deficit, and notes in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print machine-readable JSON instead of tables and messages
    #[arg(global = true, long = "json")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "reset",
            help = "Delete every habit, log, session, note and setting (asks for confirmation)"
        )]
        reset: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Replace the copy with a .zip archive")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export habit logs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD, start:end in the same form, or all"
        )]
        range: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Create, list and log habits
    Habit {
        #[command(subcommand)]
        action: HabitCmd,
    },

    /// Per-date habit status and completion
    Day {
        #[command(subcommand)]
        action: DayCmd,
    },

    /// Habit timers
    Timer {
        #[command(subcommand)]
        action: TimerCmd,
    },

    /// Daily notes
    Note {
        #[command(subcommand)]
        action: NoteCmd,
    },

    /// Application settings stored in the database
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },

    /// Summary across all habits
    Dashboard {
        #[command(subcommand)]
        action: DashboardCmd,
    },
}

#[derive(Subcommand)]
pub enum HabitCmd {
    /// Create a habit
    Add {
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(long = "timer", help = "Enable the timer for this habit")]
        timer: bool,

        #[arg(
            long = "estimate",
            value_name = "DURATION",
            help = "Daily time budget: 90 (minutes), 45s, 30m, 1h30m"
        )]
        estimate: Option<String>,

        #[arg(
            long = "days",
            value_name = "DAYS",
            help = "Scheduled weekdays: 0-6 (Mon=0) or names, comma separated"
        )]
        days: Option<String>,

        #[arg(long = "start", value_name = "YYYY-MM-DD", help = "First day the habit is listed")]
        start_date: Option<String>,

        #[arg(long = "once", help = "Mark the habit as not repeatable")]
        once: bool,
    },

    /// List habits with today's status
    List {
        #[arg(long = "all", short = 'a', help = "Include archived habits")]
        all: bool,
    },

    /// Show one habit with today's status
    Show { id: i64 },

    /// Change habit fields
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, conflicts_with = "no_description")]
        description: Option<String>,

        #[arg(long = "no-description")]
        no_description: bool,

        #[arg(long = "timer", value_name = "BOOL", action = ArgAction::Set)]
        timer: Option<bool>,

        #[arg(long = "estimate", value_name = "DURATION", conflicts_with = "no_estimate")]
        estimate: Option<String>,

        #[arg(long = "no-estimate")]
        no_estimate: bool,

        #[arg(long = "days", value_name = "DAYS", help = "Weekdays, or 'all' for every day")]
        days: Option<String>,

        #[arg(long = "start", value_name = "YYYY-MM-DD", conflicts_with = "no_start")]
        start_date: Option<String>,

        #[arg(long = "no-start")]
        no_start: bool,

        #[arg(long = "repeatable", value_name = "BOOL", action = ArgAction::Set)]
        repeatable: Option<bool>,

        #[arg(long = "active", value_name = "BOOL", action = ArgAction::Set)]
        active: Option<bool>,
    },

    /// Soft-delete a habit (history is kept)
    Del { id: i64 },

    /// Permanently delete a habit with all its logs and sessions
    Purge {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    Archive { id: i64 },

    Unarchive { id: i64 },

    /// Log today's completion
    Done {
        id: i64,

        #[arg(long = "undo", help = "Mark as not completed")]
        undo: bool,

        #[arg(long = "time", value_name = "DURATION", help = "Time spent today (replaces the stored value)")]
        time: Option<String>,
    },

    /// Recent logs of a habit, newest first
    Logs {
        id: i64,

        #[arg(long, help = "How many days back (default from config)")]
        days: Option<i64>,
    },

    /// Completion statistics of a habit
    Stats {
        id: i64,

        #[arg(long, help = "Period in days (default from config)")]
        days: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum DayCmd {
    /// Status of every habit on a date
    Show {
        #[arg(value_name = "YYYY-MM-DD", help = "Date to show (default: today)")]
        date: Option<String>,
    },

    /// Set a habit's completion on a date
    Set {
        id: i64,

        #[arg(value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long = "undo", help = "Mark as not completed")]
        undo: bool,

        #[arg(long = "time", value_name = "DURATION", help = "Time spent on that date")]
        time: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TimerCmd {
    /// Start (or restart) the timer of a habit
    Start { id: i64 },
    /// Stop the running timer and add its time to today
    Stop { id: i64 },
    Status { id: i64 },
    /// Total timed today
    Today { id: i64 },
    /// Discard today's timed sessions
    Reset { id: i64 },
}

#[derive(Subcommand)]
pub enum NoteCmd {
    Add {
        content: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Note date (default: today)")]
        date: Option<String>,
    },

    List {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    Today,

    /// Notes grouped by date
    ByDate {
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<String>,
    },

    Show { id: i64 },

    Edit {
        id: i64,

        #[arg(long)]
        content: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum SettingsCmd {
    Show,

    Set {
        #[arg(long = "carryover", value_name = "BOOL", action = ArgAction::Set)]
        carryover: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum DashboardCmd {
    Stats,

    Progress {
        #[arg(long, help = "Number of days (default from config)")]
        days: Option<i64>,
    },
}
