use crate::cli::commands::{open_pool, parse_opt_duration};
use crate::cli::parser::DayCmd;
use crate::config::Config;
use crate::core::habit::HabitLogic;
use crate::errors::AppResult;
use crate::ui::json::print_json;
use crate::ui::messages::{header, info, success};
use crate::utils::date::{parse_date_or_today, today, weekday_str};
use crate::utils::formatting::{balance_cell, check_mark, duration_cell, estimate_cell};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &DayCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        DayCmd::Show { date } => {
            let day = parse_date_or_today(date.as_ref(), today())?;
            let statuses = HabitLogic::habits_by_date(&mut pool, &day.to_string())?;
            if json {
                return print_json(&statuses);
            }
            if statuses.is_empty() {
                info(format!("No habits listed for {day}."));
                return Ok(());
            }

            header(format!("{day} {}", weekday_str(day, &cfg.show_weekday)));
            let mut t = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::left("Due"),
                Column::left("Done"),
                Column::right("Time"),
                Column::right("Estimate"),
                Column::right("Balance"),
            ]);
            for s in &statuses {
                t.add_row(vec![
                    s.habit_id.to_string(),
                    s.habit_name.clone(),
                    if s.is_scheduled { "yes".into() } else { "no".into() },
                    check_mark(s.completed),
                    duration_cell(s.time_spent_seconds),
                    estimate_cell(s.estimated_duration_seconds),
                    balance_cell(s.carryover_seconds, s.deficit_seconds),
                ]);
            }
            print!("{}", t.render());
        }

        DayCmd::Set {
            id,
            date,
            undo,
            time,
        } => {
            let time_spent = parse_opt_duration(time.as_ref())?;
            let result = HabitLogic::set_day_completion(&mut pool, *id, date, !*undo, time_spent)?;
            if json {
                print_json(&result)?;
            } else {
                success(format!(
                    "Habit {} on {}: {}",
                    result.habit_id,
                    result.date,
                    if result.completed { "done" } else { "not done" }
                ));
            }
        }
    }

    Ok(())
}
