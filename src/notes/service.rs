use std::backtrace::Backtrace;

use rusqlite::Connection;
use uuid::Uuid;

use crate::folders::repository as folder_repository;
use crate::model::error::note_errors::{
    CreateNoteError, DeleteNoteError, GetNoteError, UpdateNoteError,
};
use crate::model::request::note_requests::{CreateNoteRequest, UpdateNoteRequest};
use crate::model::response::note_responses::NoteApi;
use crate::notes::repository as note_repository;
use crate::notes::Note;
use crate::repository::{close_connection, open_connection, with_write_transaction};

/// the result of checking whether a note can be filed in a folder
enum FolderCheck {
    Active,
    Missing,
    DbError,
}

pub fn get_note(id: &str) -> Result<NoteApi, GetNoteError> {
    let con = open_connection();
    let note = note_repository::get_by_id(id, &con);
    close_connection(con);
    match note {
        Ok(note) => Ok(NoteApi::from(note)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(GetNoteError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve note {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetNoteError::DbFailure)
        }
    }
}

/// creates a note with a generated id. If a folder is passed, it must exist and not be deleted
pub fn create_note(request: &CreateNoteRequest) -> Result<NoteApi, CreateNoteError> {
    let mut con = open_connection();
    let result = with_write_transaction(
        &mut con,
        |e| note_db_failure(e, CreateNoteError::DbFailure),
        |con| create_note_internal(request, con),
    );
    close_connection(con);
    result
}

/// updates the note's contents, and moves it to another folder if `folder_id` changed
pub fn update_note(request: &UpdateNoteRequest) -> Result<NoteApi, UpdateNoteError> {
    let mut con = open_connection();
    let result = with_write_transaction(
        &mut con,
        |e| note_db_failure(e, UpdateNoteError::DbFailure),
        |con| update_note_internal(request, con),
    );
    close_connection(con);
    result
}

pub fn delete_note(id: &str) -> Result<(), DeleteNoteError> {
    let mut con = open_connection();
    let result = with_write_transaction(
        &mut con,
        |e| note_db_failure(e, DeleteNoteError::DbFailure),
        |con| delete_note_internal(id, con),
    );
    close_connection(con);
    result
}

// private functions

fn create_note_internal(
    request: &CreateNoteRequest,
    con: &Connection,
) -> Result<NoteApi, CreateNoteError> {
    if let Some(folder_id) = request.folder_id.as_deref() {
        match check_folder(folder_id, con) {
            FolderCheck::Active => { /* no op */ }
            FolderCheck::Missing => return Err(CreateNoteError::FolderNotFound),
            FolderCheck::DbError => return Err(CreateNoteError::DbFailure),
        }
    }
    let now = chrono::offset::Local::now().naive_local();
    let note = Note {
        id: Uuid::new_v4().to_string(),
        title: request.title.clone(),
        content: request.content.clone(),
        folder_id: request.folder_id.clone(),
        pinned: request.pinned,
        created_at: now,
        updated_at: now,
    };
    let saved = note_repository::create_note(&note, con).and_then(|_| {
        note.folder_id
            .as_deref()
            .map_or(Ok(()), |folder_id| folder_repository::refresh_note_count(folder_id, con))
    });
    if let Err(e) = saved {
        log::error!(
            "Failed to save note {}! Error is {e:?}\n{}",
            note.title,
            Backtrace::force_capture()
        );
        return Err(CreateNoteError::DbFailure);
    }
    Ok(NoteApi::from(note))
}

fn update_note_internal(
    request: &UpdateNoteRequest,
    con: &Connection,
) -> Result<NoteApi, UpdateNoteError> {
    let existing = match note_repository::get_by_id(&request.id, con) {
        Ok(note) => note,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(UpdateNoteError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve note {}! Error is {e:?}\n{}",
                request.id,
                Backtrace::force_capture()
            );
            return Err(UpdateNoteError::DbFailure);
        }
    };
    let moved = existing.folder_id != request.folder_id;
    if moved {
        if let Some(folder_id) = request.folder_id.as_deref() {
            match check_folder(folder_id, con) {
                FolderCheck::Active => { /* no op */ }
                FolderCheck::Missing => return Err(UpdateNoteError::FolderNotFound),
                FolderCheck::DbError => return Err(UpdateNoteError::DbFailure),
            }
        }
    }
    let updated = Note {
        title: request.title.clone(),
        content: request.content.clone(),
        folder_id: request.folder_id.clone(),
        pinned: request.pinned,
        updated_at: chrono::offset::Local::now().naive_local(),
        ..existing.clone()
    };
    let saved = note_repository::update_note(&updated, con).and_then(|_| {
        if !moved {
            return Ok(());
        }
        [existing.folder_id.as_deref(), updated.folder_id.as_deref()]
            .into_iter()
            .flatten()
            .try_for_each(|folder_id| folder_repository::refresh_note_count(folder_id, con))
    });
    if let Err(e) = saved {
        log::error!(
            "Failed to update note {}! Error is {e:?}\n{}",
            request.id,
            Backtrace::force_capture()
        );
        return Err(UpdateNoteError::DbFailure);
    }
    Ok(NoteApi::from(updated))
}

fn delete_note_internal(id: &str, con: &Connection) -> Result<(), DeleteNoteError> {
    let existing = match note_repository::get_by_id(id, con) {
        Ok(note) => note,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DeleteNoteError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to retrieve note {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(DeleteNoteError::DbFailure);
        }
    };
    let deleted = note_repository::delete_note(id, con).and_then(|_| {
        existing
            .folder_id
            .as_deref()
            .map_or(Ok(()), |folder_id| folder_repository::refresh_note_count(folder_id, con))
    });
    deleted.map_err(|e| {
        log::error!(
            "Failed to delete note {id}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        DeleteNoteError::DbFailure
    })
}

/// notes can only be filed in folders that exist and haven't been deleted
fn check_folder(folder_id: &str, con: &Connection) -> FolderCheck {
    match folder_repository::get_by_id(folder_id, con) {
        Ok(folder) if !folder.deleted => FolderCheck::Active,
        Ok(_) | Err(rusqlite::Error::QueryReturnedNoRows) => FolderCheck::Missing,
        Err(e) => {
            log::error!(
                "Failed to retrieve folder {folder_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            FolderCheck::DbError
        }
    }
}

fn note_db_failure<E>(e: rusqlite::Error, error: E) -> E {
    log::error!(
        "Note transaction failed! Error is {e:?}\n{}",
        Backtrace::force_capture()
    );
    error
}
