use crate::cli::parser::Commands;
use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::queries::reset_all_data;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::json::print_json;
use crate::ui::messages::{confirm, error, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
        reset,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        if *migrate {
            info("Running migrations…");
            let applied = run_pending_migrations(&pool.conn)?;
            if applied.is_empty() {
                success("Database schema is up to date.");
            } else {
                success(format!("Applied: {}", applied.join(", ")));
            }
        }

        if *show_info {
            let db_info = stats::collect_db_info(&mut pool, &cfg.database)?;
            if json {
                print_json(&db_info)?;
            } else {
                stats::print_db_info(&db_info);
            }
        }

        if *check {
            info("Running integrity check…");
            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {integrity}"));
            }
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }

        if *reset {
            warning("This deletes every habit, log, timer session, note and setting.");
            if !confirm("Reset the database?")? {
                info("Reset cancelled.");
                return Ok(());
            }
            pool.with_tx(|tx| {
                reset_all_data(tx)?;
                ttlog(tx, "db_reset", &cfg.database, "all user data deleted")
            })?;
            success("Database reset completed.");
        }
    }

    Ok(())
}
