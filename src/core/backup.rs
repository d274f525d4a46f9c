use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest`, optionally replacing it with a
    /// `.zip` archive. Returns the path actually written.
    ///
    /// An existing `dest` is overwritten; callers confirm beforehand.
    pub fn backup(pool: &mut DbPool, db_path: &Path, dest: &Path, compress: bool) -> AppResult<PathBuf> {
        if !db_path.exists() {
            return Err(AppError::NotFound(format!("Database {}", db_path.display())));
        }
        if dest == db_path {
            return Err(AppError::InvalidInput(
                "backup destination is the database itself".into(),
            ));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // flush the WAL, if any, so the copied file is complete
        pool.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        fs::copy(db_path, dest)?;

        let final_path = if compress {
            let archive = compress_backup(dest)?;
            fs::remove_file(dest)?;
            archive
        } else {
            dest.to_path_buf()
        };

        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(final_path)
    }
}

/// Zip `path` next to itself as `<stem>.zip`.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rhabitlogger.sqlite".to_string());

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}
