use std::fs::remove_file;
use std::path::Path;

use rocket::local::blocking::Client;

use crate::folders;
use crate::folders::Folder;
use crate::notes;
use crate::notes::Note;
use crate::repository::{initialize_db, open_connection};

/// username:password
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

/// creates a fresh database with `username:password` set as the credentials
pub fn set_password() {
    refresh_db();
    let client = Client::tracked(crate::rocket()).unwrap();
    client
        .post(uri!("/api/password"))
        .body(r#"{"username":"username","password":"password"}"#)
        .dispatch();
}

pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

/// builds a folder in memory without touching the database
pub fn folder(id: &str, name: &str, parent_id: Option<&str>) -> Folder {
    let now = chrono::offset::Local::now().naive_local();
    Folder {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        parent_id: parent_id.map(str::to_string),
        color: None,
        icon: None,
        created_at: now,
        updated_at: now,
        deleted: false,
        sort_order: 0,
        note_count: 0,
    }
}

/// saves a folder with a fixed id directly to the database, skipping every check the service does
pub fn create_folder_db_entry(id: &str, name: &str, parent_id: Option<&str>) -> Folder {
    let con = open_connection();
    let folder = folder(id, name, parent_id);
    folders::repository::create_folder(&folder, &con).unwrap();
    con.close().unwrap();
    folder
}

/// saves a note with a fixed id directly to the database and refreshes the folder's note count
pub fn create_note_db_entry(id: &str, title: &str, folder_id: Option<&str>) -> Note {
    let con = open_connection();
    let now = chrono::offset::Local::now().naive_local();
    let note = Note {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        folder_id: folder_id.map(str::to_string),
        pinned: false,
        created_at: now,
        updated_at: now,
    };
    notes::repository::create_note(&note, &con).unwrap();
    if let Some(folder_id) = folder_id {
        folders::repository::refresh_note_count(folder_id, &con).unwrap();
    }
    con.close().unwrap();
    note
}

pub fn get_folder_db_entry(id: &str) -> Folder {
    let con = open_connection();
    let folder = folders::repository::get_by_id(id, &con).unwrap();
    con.close().unwrap();
    folder
}

pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
}
