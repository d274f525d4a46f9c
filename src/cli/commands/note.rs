use crate::cli::commands::open_pool;
use crate::cli::parser::NoteCmd;
use crate::config::Config;
use crate::core::note::NoteLogic;
use crate::errors::AppResult;
use crate::models::note::Note;
use crate::ui::json::print_json;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::{parse_date_arg, parse_date_or_today, today, weekday_str};

fn print_notes(notes: &[Note]) {
    for n in notes {
        println!("{GREY}#{:<4}{RESET} {}", n.id, n.content);
    }
}

pub fn handle(cmd: &NoteCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        NoteCmd::Add { content, date } => {
            let day = parse_date_or_today(date.as_ref(), today())?;
            let note = NoteLogic::create(&mut pool, content, day)?;
            if json {
                return print_json(&note);
            }
            success(format!("Note {} added for {}.", note.id, note.date));
        }

        NoteCmd::List { date } => {
            let day = date.as_deref().map(parse_date_arg).transpose()?;
            let notes = NoteLogic::list(&mut pool, day)?;
            if json {
                return print_json(&notes);
            }
            if notes.is_empty() {
                info("No notes found.");
            }
            let mut current = None;
            for n in &notes {
                if current != Some(n.date) {
                    header(format!("{} {}", n.date, weekday_str(n.date, &cfg.show_weekday)));
                    current = Some(n.date);
                }
                print_notes(std::slice::from_ref(n));
            }
        }

        NoteCmd::Today => {
            let notes = NoteLogic::today(&mut pool, today())?;
            if json {
                return print_json(&notes);
            }
            if notes.is_empty() {
                info("No notes for today.");
            }
            print_notes(&notes);
        }

        NoteCmd::ByDate { from, to } => {
            let start = from.as_deref().map(parse_date_arg).transpose()?;
            let end = to.as_deref().map(parse_date_arg).transpose()?;
            let groups = NoteLogic::by_date(&mut pool, start, end)?;
            if json {
                return print_json(&groups);
            }
            if groups.is_empty() {
                info("No notes found.");
            }
            for g in &groups {
                header(format!(
                    "{} {} ({} note(s))",
                    g.date,
                    weekday_str(g.date, &cfg.show_weekday),
                    g.notes.len()
                ));
                print_notes(&g.notes);
            }
        }

        NoteCmd::Show { id } => {
            let note = NoteLogic::get(&mut pool, *id)?;
            if json {
                return print_json(&note);
            }
            println!("#{} {}", note.id, note.date);
            println!("{GREY}created {} / updated {}{RESET}", note.created_at, note.updated_at);
            println!();
            println!("{}", note.content);
        }

        NoteCmd::Edit { id, content, date } => {
            let day = date.as_deref().map(parse_date_arg).transpose()?;
            let note = NoteLogic::update(&mut pool, *id, content.as_deref(), day)?;
            if json {
                return print_json(&note);
            }
            success(format!("Note {} updated.", note.id));
        }

        NoteCmd::Del { id } => {
            NoteLogic::delete(&mut pool, *id)?;
            success(format!("Note {id} deleted."));
        }
    }

    Ok(())
}
