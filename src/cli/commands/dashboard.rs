use crate::cli::commands::open_pool;
use crate::cli::parser::DashboardCmd;
use crate::config::Config;
use crate::core::dashboard::DashboardLogic;
use crate::errors::AppResult;
use crate::ui::json::print_json;
use crate::ui::messages::header;
use crate::utils::date::{today, weekday_str};
use crate::utils::formatting::percent_cell;
use crate::utils::table::{Column, Table};
use crate::utils::time::secs2readable;

const BAR_WIDTH: usize = 20;

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn handle(cmd: &DashboardCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let today = today();

    match cmd {
        DashboardCmd::Stats => {
            let s = DashboardLogic::stats(&mut pool, today)?;
            if json {
                return print_json(&s);
            }
            header(format!("Dashboard {today}"));
            println!("  Habits          : {}", s.total_habits);
            println!(
                "  Completed today : {} ({})",
                s.completed_today,
                percent_cell(s.completion_percentage)
            );
            println!("  Timed today     : {}", secs2readable(s.total_time_today));
            println!("  Streak          : {} day(s)", s.current_streak);
            println!("  Notes today     : {}", s.notes_today);
        }

        DashboardCmd::Progress { days } => {
            let days = days.unwrap_or(cfg.progress_days);
            let progress = DashboardLogic::progress(&mut pool, days, today)?;
            if json {
                return print_json(&progress);
            }
            header(format!("Progress, last {days} day(s)"));
            let mut t = Table::new(vec![
                Column::left("Date"),
                Column::right("Done"),
                Column::left(""),
                Column::right("%"),
            ]);
            for p in &progress {
                t.add_row(vec![
                    format!("{} {}", p.date, weekday_str(p.date, &cfg.show_weekday))
                        .trim_end()
                        .to_string(),
                    format!("{}/{}", p.completed, p.total),
                    bar(p.percentage),
                    percent_cell(p.percentage),
                ]);
            }
            print!("{}", t.render());
        }
    }

    Ok(())
}
