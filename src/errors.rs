//! Error type shared by the storage, logic and command layers.
//! `main` prints it as `Error: <message>` and exits with status 1.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid date format: {0} (use YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Lookup / state errors
    // ---------------------------
    #[error("{0} not found")]
    NotFound(String),

    #[error("Habit {0} does not have timer enabled")]
    TimerNotEnabled(i64),

    #[error("No running timer found for habit {0}")]
    NoRunningTimer(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn habit_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Habit {id}"))
    }

    pub fn note_not_found(id: i64) -> Self {
        AppError::NotFound(format!("Note {id}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
