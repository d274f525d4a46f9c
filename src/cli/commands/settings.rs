use crate::cli::commands::open_pool;
use crate::cli::parser::SettingsCmd;
use crate::config::Config;
use crate::core::settings::SettingsLogic;
use crate::errors::AppResult;
use crate::models::dashboard::Settings;
use crate::ui::json::print_json;
use crate::ui::messages::{info, success};

fn print_settings(s: &Settings) {
    println!(
        "carryover_enabled : {}",
        if s.carryover_enabled { "on" } else { "off" }
    );
}

pub fn handle(cmd: &SettingsCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        SettingsCmd::Show => {
            let s = SettingsLogic::settings(&pool.conn)?;
            if json {
                return print_json(&s);
            }
            print_settings(&s);
        }
        SettingsCmd::Set { carryover } => {
            if carryover.is_none() {
                info("Nothing to change. Use --carryover true|false.");
            }
            let s = SettingsLogic::update(&mut pool, *carryover)?;
            if json {
                return print_json(&s);
            }
            success("Settings saved.");
            print_settings(&s);
        }
    }

    Ok(())
}
