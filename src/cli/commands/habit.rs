use crate::cli::commands::{open_pool, parse_opt_duration};
use crate::cli::parser::HabitCmd;
use crate::config::Config;
use crate::core::habit::HabitLogic;
use crate::errors::AppResult;
use crate::models::habit::{HabitInput, HabitPatch, HabitStats, HabitWithStats};
use crate::models::habit_log::HabitLog;
use crate::ui::json::print_json;
use crate::ui::messages::{confirm, header, info, success, warning};
use crate::utils::colors::{RESET, color_for_habit};
use crate::utils::date::{parse_date_arg, parse_weekdays, today, weekday_str};
use crate::utils::formatting::{
    balance_cell, bold, check_mark, duration_cell, estimate_cell, percent_cell,
};
use crate::utils::table::{Column, Table};
use crate::utils::time::secs2readable;

pub fn handle(cmd: &HabitCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let today = today();

    match cmd {
        HabitCmd::Add {
            name,
            description,
            timer,
            estimate,
            days,
            start_date,
            once,
        } => {
            let estimate = parse_opt_duration(estimate.as_ref())?;
            let input = HabitInput {
                name: name.clone(),
                description: description.clone(),
                is_repeatable: !*once,
                // an estimate implies a timer
                has_timer: *timer || estimate.is_some(),
                estimated_duration_seconds: estimate,
                schedule_days: days.as_deref().map(parse_weekdays).transpose()?.unwrap_or_default(),
                start_date: start_date.as_deref().map(parse_date_arg).transpose()?,
            };

            let habit = HabitLogic::create(&mut pool, input)?;
            if json {
                print_json(&habit)?;
            } else {
                success(format!("Habit {} created: {}", habit.id, habit.name));
            }
        }

        HabitCmd::List { all } => {
            let habits = HabitLogic::list(&mut pool, *all, today)?;
            if json {
                return print_json(&habits);
            }
            if habits.is_empty() {
                info("No habits yet. Add one with `rhabitlogger habit add <NAME>`.");
                return Ok(());
            }

            let day_label = weekday_str(today, &cfg.show_weekday);
            header(format!("Habits for {today} {day_label}"));
            print!("{}", habits_table(&habits).render());
        }

        HabitCmd::Show { id } => {
            let h = HabitLogic::get(&mut pool, *id, today)?;
            if json {
                return print_json(&h);
            }
            print_habit(&h);
        }

        HabitCmd::Edit {
            id,
            name,
            description,
            no_description,
            timer,
            estimate,
            no_estimate,
            days,
            start_date,
            no_start,
            repeatable,
            active,
        } => {
            let mut patch = HabitPatch {
                name: name.clone(),
                is_repeatable: *repeatable,
                has_timer: *timer,
                is_active: *active,
                ..HabitPatch::default()
            };
            if *no_description {
                patch.description = Some(None);
            } else if let Some(d) = description {
                patch.description = Some(Some(d.clone()));
            }
            if *no_estimate {
                patch.estimated_duration_seconds = Some(None);
            } else if let Some(e) = parse_opt_duration(estimate.as_ref())? {
                patch.estimated_duration_seconds = Some(Some(e));
            }
            if let Some(d) = days {
                patch.schedule_days = Some(if d.eq_ignore_ascii_case("all") {
                    Vec::new()
                } else {
                    parse_weekdays(d)?
                });
            }
            if *no_start {
                patch.start_date = Some(None);
            } else if let Some(s) = start_date {
                patch.start_date = Some(Some(parse_date_arg(s)?));
            }

            let habit = HabitLogic::update(&mut pool, *id, patch)?;
            if json {
                print_json(&habit)?;
            } else {
                success(format!("Habit {} updated.", habit.id));
            }
        }

        HabitCmd::Del { id } => {
            HabitLogic::delete(&mut pool, *id)?;
            success(format!("Habit {id} deleted (history kept; `habit purge` removes it)."));
        }

        HabitCmd::Purge { id, yes } => {
            if !*yes {
                warning(format!(
                    "Habit {id} will be removed with all its logs and timer sessions."
                ));
                if !confirm("Continue?")? {
                    info("Purge cancelled.");
                    return Ok(());
                }
            }
            HabitLogic::purge(&mut pool, *id)?;
            success(format!("Habit {id} purged."));
        }

        HabitCmd::Archive { id } => {
            HabitLogic::archive(&mut pool, *id)?;
            success(format!("Habit {id} archived."));
        }

        HabitCmd::Unarchive { id } => {
            HabitLogic::unarchive(&mut pool, *id)?;
            success(format!("Habit {id} unarchived."));
        }

        HabitCmd::Done { id, undo, time } => {
            let time_spent = match parse_opt_duration(time.as_ref())? {
                Some(t) => t,
                None => HabitLogic::get(&mut pool, *id, today)?.time_spent_today,
            };

            let log = HabitLogic::log_today(&mut pool, *id, !*undo, time_spent, today)?;
            if json {
                print_json(&log)?;
            } else if log.completed {
                success(format!("Habit {id} done for {today}."));
            } else {
                success(format!("Habit {id} marked not done for {today}."));
            }
        }

        HabitCmd::Logs { id, days } => {
            let days = days.unwrap_or(cfg.default_log_days);
            let logs = HabitLogic::logs(&mut pool, *id, days, today)?;
            if json {
                return print_json(&logs);
            }
            if logs.is_empty() {
                info(format!("No logs for habit {id} in the last {days} day(s)."));
                return Ok(());
            }
            header(format!("Habit {id}: last {days} day(s)"));
            print!("{}", logs_table(&logs, &cfg.show_weekday).render());
        }

        HabitCmd::Stats { id, days } => {
            let days = days.unwrap_or(cfg.default_log_days);
            let stats = HabitLogic::stats(&mut pool, *id, days, today)?;
            if json {
                return print_json(&stats);
            }
            print_stats(&stats);
        }
    }

    Ok(())
}

fn habits_table(habits: &[HabitWithStats]) -> Table {
    let mut t = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Days"),
        Column::left("Due"),
        Column::left("Done"),
        Column::right("Time"),
        Column::right("Estimate"),
        Column::right("Balance"),
        Column::right("Streak"),
    ]);

    for h in habits {
        let color = color_for_habit(h.habit.is_archived, h.habit.is_active);
        t.add_row(vec![
            h.habit.id.to_string(),
            format!("{color}{}{RESET}", h.habit.name),
            h.habit.schedule_days.label(),
            if h.is_scheduled_today { "yes".into() } else { "no".into() },
            check_mark(h.completed_today),
            duration_cell(h.time_spent_today),
            estimate_cell(h.habit.estimated_duration_seconds),
            balance_cell(h.carryover_seconds, h.deficit_seconds),
            h.streak.to_string(),
        ]);
    }
    t
}

fn logs_table(logs: &[HabitLog], show_weekday: &str) -> Table {
    let mut t = Table::new(vec![
        Column::left("Date"),
        Column::left("Done"),
        Column::right("Time"),
        Column::right("Balance"),
    ]);
    for l in logs {
        t.add_row(vec![
            format!("{} {}", l.date, weekday_str(l.date, show_weekday))
                .trim_end()
                .to_string(),
            check_mark(l.completed),
            duration_cell(l.time_spent_seconds),
            balance_cell(l.carryover_seconds, l.deficit_seconds),
        ]);
    }
    t
}

fn print_habit(h: &HabitWithStats) {
    let habit = &h.habit;
    println!("{} {}", bold(&format!("#{}", habit.id)), bold(&habit.name));
    if let Some(d) = &habit.description {
        println!("  {d}");
    }
    println!();
    println!("  Schedule   : {}", habit.schedule_days.label());
    println!(
        "  Timer      : {}",
        if habit.has_timer { "enabled" } else { "disabled" }
    );
    println!("  Estimate   : {}", estimate_cell(habit.estimated_duration_seconds));
    if let Some(start) = habit.start_date {
        println!("  Starts on  : {start}");
    }
    println!(
        "  Status     : {}{}",
        if habit.is_active { "active" } else { "deleted" },
        if habit.is_archived { ", archived" } else { "" }
    );
    println!();
    println!("  Today      : {}", check_mark(h.completed_today));
    println!("  Time today : {}", duration_cell(h.time_spent_today));
    println!(
        "  Balance    : {}",
        balance_cell(h.carryover_seconds, h.deficit_seconds)
    );
    println!("  Streak     : {}", h.streak);
}

fn print_stats(s: &HabitStats) {
    header(format!("{} (#{}) - last {} day(s)", s.habit_name, s.habit_id, s.period_days));
    println!("  Completed days  : {}", s.completed_days);
    println!("  Completion rate : {}", percent_cell(s.completion_rate));
    println!("  Total time      : {}", secs2readable(s.total_time_seconds));
    println!("  Current streak  : {}", s.current_streak);
}
