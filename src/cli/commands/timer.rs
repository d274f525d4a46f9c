use crate::cli::commands::open_pool;
use crate::cli::parser::TimerCmd;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::errors::AppResult;
use crate::ui::json::print_json;
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_timer};
use crate::utils::time::{now, secs2readable};

pub fn handle(cmd: &TimerCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let now = now();

    match cmd {
        TimerCmd::Start { id } => {
            let session = TimerLogic::start(&mut pool, *id, now)?;
            if json {
                return print_json(&session);
            }
            success(format!(
                "Timer started for habit {id} at {}",
                session.start_time.format("%H:%M:%S")
            ));
        }

        TimerCmd::Stop { id } => {
            let session = TimerLogic::stop(&mut pool, *id, now)?;
            if json {
                return print_json(&session);
            }
            success(format!(
                "Timer stopped for habit {id}: {}",
                secs2readable(session.duration_seconds)
            ));
        }

        TimerCmd::Status { id } => {
            let status = TimerLogic::status(&mut pool, *id, now)?;
            if json {
                return print_json(&status);
            }
            let color = color_for_timer(status.is_running);
            match &status.current_session {
                Some(s) => println!(
                    "{color}● running{RESET} since {} ({})",
                    s.start_time.format("%H:%M:%S"),
                    secs2readable(s.duration_seconds)
                ),
                None => println!("{color}○ idle{RESET}"),
            }
            println!("Today: {}", secs2readable(status.total_time_today));
        }

        TimerCmd::Today { id } => {
            let total = TimerLogic::today_total(&mut pool, *id, now)?;
            if json {
                return print_json(&total);
            }
            println!("{}", secs2readable(total.total_seconds));
        }

        TimerCmd::Reset { id } => {
            TimerLogic::reset(&mut pool, *id, now)?;
            info(format!("Today's timed sessions for habit {id} discarded."));
        }
    }

    Ok(())
}
