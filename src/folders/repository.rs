use rusqlite::{params, Connection};

use crate::folders::Folder;

/// retrieves the folder with the passed id, whether it's deleted or not
pub fn get_by_id(id: &str, con: &Connection) -> Result<Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_id.sql"
    ))?;
    pst.query_row([id], map_folder)
}

/// returns every folder that has not been deleted. This is the snapshot every hierarchy check runs against
pub fn get_all_folders(con: &Connection) -> Result<Vec<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/get_all_folders.sql"))?;
    let rows = pst.query_map([], map_folder)?;
    rows.collect()
}

/// returns every folder in the database, including deleted ones
pub fn get_all_folders_including_deleted(con: &Connection) -> Result<Vec<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_all_folders_including_deleted.sql"
    ))?;
    let rows = pst.query_map([], map_folder)?;
    rows.collect()
}

/// returns the non-deleted folders directly inside `parent_id`, or the top-level folders if `parent_id` is `None`
pub fn get_child_folders(
    parent_id: Option<&str>,
    con: &Connection,
) -> Result<Vec<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_child_folders.sql"
    ))?;
    let rows = pst.query_map([parent_id], map_folder)?;
    rows.collect()
}

/// the sort order a folder needs in order to be placed after all of its siblings
pub fn get_next_sort_order(parent_id: Option<&str>, con: &Connection) -> Result<i64, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/folder/get_next_sort_order.sql"),
        [parent_id],
        |row| row.get(0),
    )
}

/// creates a folder record in the database.
/// This does not do any checks on folder parent id or any other data,
/// and that must be done before this function is called
pub fn create_folder(folder: &Folder, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/create_folder.sql"))?;
    pst.execute(params![
        folder.id,
        folder.name,
        folder.description,
        folder.parent_id,
        folder.color,
        folder.icon,
        folder.created_at,
        folder.updated_at,
        folder.deleted,
        folder.sort_order,
        folder.note_count
    ])?;
    Ok(())
}

/// updates a folder record in the database.
/// This does not perform any checks on folder info, and that must be done
/// before this function is called
pub fn update_folder(folder: &Folder, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/update_folder.sql"))?;
    pst.execute(params![
        folder.name,
        folder.description,
        folder.parent_id,
        folder.color,
        folder.icon,
        folder.updated_at,
        folder.sort_order,
        folder.id
    ])?;
    Ok(())
}

/// flips the soft-delete flag of a single folder. Children are not touched
pub fn set_deleted(
    id: &str,
    deleted: bool,
    updated_at: chrono::NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/set_folder_deleted.sql"
    ))?;
    pst.execute(params![deleted, updated_at, id])?;
    Ok(())
}

/// permanently removes a single folder record. This _does not_ check if the folder exists first,
/// and does not touch its children or notes
pub fn delete_folder(id: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/delete_folder_by_id.sql"
    ))?;
    pst.execute([id])?;
    Ok(())
}

/// recounts the notes filed directly in the folder and caches the result on the folder record
pub fn refresh_note_count(id: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/refresh_note_count.sql"
    ))?;
    pst.execute([id])?;
    Ok(())
}

fn map_folder(row: &rusqlite::Row) -> Result<Folder, rusqlite::Error> {
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        parent_id: row.get(3)?,
        color: row.get(4)?,
        icon: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
        deleted: row.get(8)?,
        sort_order: row.get(9)?,
        note_count: row.get(10)?,
    })
}
