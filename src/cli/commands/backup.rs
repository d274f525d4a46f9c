use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::json::print_json;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::path::expand_tilde;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let dest = expand_tilde(file);

        if dest.exists() && !*force {
            warning(format!("The file '{}' already exists.", dest.display()));
            if !confirm("Overwrite it?")? {
                info("Backup cancelled.");
                return Ok(());
            }
        }

        let mut pool = open_pool(cfg)?;
        let written = BackupLogic::backup(&mut pool, Path::new(&cfg.database), &dest, *compress)?;

        if json {
            print_json(&serde_json::json!({ "backup": written.to_string_lossy() }))?;
        } else {
            success(format!("Backup created: {}", written.display()));
        }
    }

    Ok(())
}
