use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::visible_len;
use ansi_term::Colour;

const OP_WIDTH: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "habit_add" | "note_add" | "timer_start" => Colour::Green,
        "habit_del" | "habit_purge" | "note_del" | "db_reset" => Colour::Red,
        "habit_edit" | "note_edit" | "day_set" | "habit_log" | "settings_update" => Colour::Yellow,
        "habit_archive" | "habit_unarchive" => Colour::Cyan,
        "timer_stop" | "timer_reset" => Colour::RGB(255, 153, 51),
        "reconcile" => Colour::Purple,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` with only the operation coloured, cut to `width`
/// visible characters.
fn op_target_cell(entry: &LogEntry, width: usize) -> String {
    let color = color_for_operation(&entry.operation);

    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let plain = if plain.chars().count() > width {
        let mut s: String = plain.chars().take(width.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match plain.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(plain.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn entries(pool: &mut DbPool) -> AppResult<Vec<LogEntry>> {
        load_log(&pool.conn)
    }

    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = Self::entries(pool)?;

        println!("📜 Internal log:\n");
        if entries.is_empty() {
            println!("  (empty)");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);

        for (entry, date) in entries.iter().zip(&dates) {
            let cell = op_target_cell(entry, OP_WIDTH);
            let padding = " ".repeat(OP_WIDTH.saturating_sub(visible_len(&cell)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id, date, cell, padding, entry.message,
            );
        }

        Ok(())
    }
}
