use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_logs_with_names;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::HabitLogExport;
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

pub struct ExportLogic;

impl ExportLogic {
    /// Export habit logs, oldest first.
    ///
    /// `file` must be absolute (a leading `~/` is expanded). `range` takes
    /// the forms of [`parse_range`]; `None` exports everything. Returns the
    /// number of rows written; nothing is written when the range is empty.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);
        if !path.is_absolute() {
            return Err(AppError::InvalidInput(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) => parse_range(r)?,
        };

        let rows = Self::rows(pool, bounds)?;
        if rows.is_empty() {
            warning("No habit logs found for the selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} {} row(s)", format.as_str(), rows.len()),
        )?;

        Ok(rows.len())
    }

    pub fn rows(
        pool: &mut DbPool,
        bounds: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> AppResult<Vec<HabitLogExport>> {
        Ok(load_logs_with_names(&pool.conn, bounds)?
            .iter()
            .map(|(log, name)| HabitLogExport::from_log(log, name))
            .collect())
    }
}
