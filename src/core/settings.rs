use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{get_setting, set_setting};
use crate::errors::AppResult;
use crate::models::dashboard::Settings;
use rusqlite::Connection;

pub const CARRYOVER_ENABLED: &str = "carryover_enabled";

/// Key/value application settings stored in `app_settings`.
pub struct SettingsLogic;

impl SettingsLogic {
    /// Boolean setting; a missing or unrecognised value yields `default`.
    pub fn get_bool(conn: &Connection, key: &str, default: bool) -> AppResult<bool> {
        let value = get_setting(conn, key)?.map(|v| v.trim().to_ascii_lowercase());
        Ok(match value.as_deref() {
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            _ => default,
        })
    }

    pub fn set_bool(conn: &Connection, key: &str, value: bool) -> AppResult<()> {
        set_setting(conn, key, if value { "true" } else { "false" })
    }

    pub fn carryover_enabled(conn: &Connection) -> AppResult<bool> {
        Self::get_bool(conn, CARRYOVER_ENABLED, false)
    }

    pub fn settings(conn: &Connection) -> AppResult<Settings> {
        Ok(Settings {
            carryover_enabled: Self::carryover_enabled(conn)?,
        })
    }

    /// Apply the given changes and return the resulting settings.
    pub fn update(pool: &mut DbPool, carryover_enabled: Option<bool>) -> AppResult<Settings> {
        pool.with_tx(|tx| {
            if let Some(enabled) = carryover_enabled {
                Self::set_bool(tx, CARRYOVER_ENABLED, enabled)?;
                ttlog(
                    tx,
                    "settings_update",
                    CARRYOVER_ENABLED,
                    &format!("carryover_enabled = {enabled}"),
                )?;
            }
            Self::settings(tx)
        })
    }
}
