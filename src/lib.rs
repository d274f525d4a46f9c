//! rHabitLogger library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (storage, habit/timer/note logic, exports).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let json = cli.json;
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, json),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg, json),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg, json),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg, json),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Habit { action } => cli::commands::habit::handle(action, cfg, json),
        Commands::Day { action } => cli::commands::day::handle(action, cfg, json),
        Commands::Timer { action } => cli::commands::timer::handle(action, cfg, json),
        Commands::Note { action } => cli::commands::note::handle(action, cfg, json),
        Commands::Settings { action } => cli::commands::settings::handle(action, cfg, json),
        Commands::Dashboard { action } => cli::commands::dashboard::handle(action, cfg, json),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    ui::messages::set_quiet(cli.json);

    // config is loaded once; --db wins over the configured database
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
