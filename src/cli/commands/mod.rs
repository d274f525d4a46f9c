pub mod backup;
pub mod config;
pub mod dashboard;
pub mod day;
pub mod db;
pub mod export;
pub mod habit;
pub mod init;
pub mod log;
pub mod note;
pub mod settings;
pub mod timer;

use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::parse_duration_secs;

/// Open the configured database with its schema brought up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    open_db(&cfg.database)
}

pub(crate) fn parse_opt_duration(value: Option<&String>) -> AppResult<Option<i64>> {
    value.map(|v| parse_duration_secs(v)).transpose()
}
