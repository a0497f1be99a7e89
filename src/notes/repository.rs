use rusqlite::{params, Connection};

use crate::notes::Note;

/// creates a note record in the database. The caller must make sure the folder exists
pub fn create_note(note: &Note, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/note/create_note.sql"))?;
    pst.execute(params![
        note.id,
        note.title,
        note.content,
        note.folder_id,
        note.pinned,
        note.created_at,
        note.updated_at
    ])?;
    Ok(())
}

pub fn get_by_id(id: &str, con: &Connection) -> Result<Note, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/note/get_note_by_id.sql"))?;
    pst.query_row([id], map_note)
}

/// returns the notes filed in `folder_id`, or the unfiled notes if `folder_id` is `None`.
/// Pinned notes come first, then the most recently updated
pub fn get_notes_in_folder(
    folder_id: Option<&str>,
    con: &Connection,
) -> Result<Vec<Note>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/note/get_notes_in_folder.sql"
    ))?;
    let rows = pst.query_map([folder_id], map_note)?;
    rows.collect()
}

pub fn update_note(note: &Note, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/note/update_note.sql"))?;
    pst.execute(params![
        note.title,
        note.content,
        note.folder_id,
        note.pinned,
        note.updated_at,
        note.id
    ])?;
    Ok(())
}

pub fn delete_note(id: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/note/delete_note_by_id.sql"))?;
    pst.execute([id])?;
    Ok(())
}

/// moves every note in the folder to the top level. Used before a folder is permanently removed
pub fn unfile_notes_in_folder(folder_id: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/note/unfile_notes_in_folder.sql"
    ))?;
    pst.execute([folder_id])?;
    Ok(())
}

fn map_note(row: &rusqlite::Row) -> Result<Note, rusqlite::Error> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        folder_id: row.get(3)?,
        pinned: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
