use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::json::print_json;

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let mut pool = open_pool(cfg)?;
        if json {
            print_json(&LogLogic::entries(&mut pool)?)?;
        } else {
            LogLogic::print_log(&mut pool)?;
        }
    }
    Ok(())
}
