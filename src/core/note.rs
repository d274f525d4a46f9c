use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_note, find_note, insert_note, load_notes, update_note};
use crate::errors::{AppError, AppResult};
use crate::models::note::{Note, NotesByDate};
use crate::utils::formatting::truncate;
use chrono::{Local, NaiveDate};

/// Free-text daily notes.
pub struct NoteLogic;

fn validate_content(content: &str) -> AppResult<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("note content cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

impl NoteLogic {
    pub fn create(pool: &mut DbPool, content: &str, date: NaiveDate) -> AppResult<Note> {
        let content = validate_content(content)?;

        pool.with_tx(|tx| {
            let id = insert_note(tx, &content, &date)?;
            ttlog(tx, "note_add", &format!("note {id}"), &truncate(&content, 40))?;
            find_note(tx, id)?.ok_or_else(|| AppError::note_not_found(id))
        })
    }

    /// All notes, or those of one date. Newest date first, then newest created.
    pub fn list(pool: &mut DbPool, date: Option<NaiveDate>) -> AppResult<Vec<Note>> {
        load_notes(&pool.conn, date, date)
    }

    pub fn today(pool: &mut DbPool, today: NaiveDate) -> AppResult<Vec<Note>> {
        Self::list(pool, Some(today))
    }

    /// Notes grouped per date, newest date first.
    pub fn by_date(
        pool: &mut DbPool,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<NotesByDate>> {
        let mut groups: Vec<NotesByDate> = Vec::new();

        for note in load_notes(&pool.conn, start, end)? {
            match groups.last_mut() {
                Some(g) if g.date == note.date => g.notes.push(note),
                _ => groups.push(NotesByDate {
                    date: note.date,
                    notes: vec![note],
                }),
            }
        }

        Ok(groups)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Note> {
        find_note(&pool.conn, id)?.ok_or_else(|| AppError::note_not_found(id))
    }

    pub fn update(
        pool: &mut DbPool,
        id: i64,
        content: Option<&str>,
        date: Option<NaiveDate>,
    ) -> AppResult<Note> {
        if content.is_none() && date.is_none() {
            return Err(AppError::InvalidInput("nothing to update".into()));
        }
        let content = content.map(validate_content).transpose()?;

        pool.with_tx(|tx| {
            let mut note = find_note(tx, id)?.ok_or_else(|| AppError::note_not_found(id))?;

            if let Some(c) = content {
                note.content = c;
            }
            if let Some(d) = date {
                note.date = d;
            }
            note.updated_at = Local::now().to_rfc3339();

            update_note(tx, &note)?;
            ttlog(tx, "note_edit", &format!("note {id}"), &truncate(&note.content, 40))?;
            Ok(note)
        })
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        pool.with_tx(|tx| {
            if delete_note(tx, id)? == 0 {
                return Err(AppError::note_not_found(id));
            }
            ttlog(tx, "note_del", &format!("note {id}"), "deleted")?;
            Ok(())
        })
    }
}
