use std::backtrace::Backtrace;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use uuid::Uuid;

use crate::folders::repository as folder_repository;
use crate::folders::Folder;
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, GetFolderError, RestoreFolderError, UpdateFolderError,
};
use crate::model::request::folder_requests::{
    CreateFolderRequest, MoveFolderRequest, UpdateFolderRequest,
};
use crate::model::response::folder_responses::{
    FolderApi, FolderResponse, FolderTreeNode, RootFolderResponse,
};
use crate::model::response::note_responses::NoteApi;
use crate::notes::repository as note_repository;
use crate::repository::{close_connection, open_connection, with_write_transaction};

static COLOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^#[0-9a-fA-F]{6}$").unwrap());

/// retrieves a non-deleted folder along with its breadcrumb path, depth, child folders, and notes
pub fn get_folder(id: &str) -> Result<FolderResponse, GetFolderError> {
    let con = open_connection();
    let result = get_folder_internal(id, &con);
    close_connection(con);
    result
}

/// retrieves the top-level folders and the notes that aren't filed in any folder.
///
/// A folder whose parent can't be found is listed here too, the same as in [`get_folder_tree`]
pub fn get_root_folder() -> Result<RootFolderResponse, GetFolderError> {
    let con = open_connection();
    let all_folders = folder_repository::get_all_folders(&con);
    let notes = note_repository::get_notes_in_folder(None, &con);
    close_connection(con);
    let (all_folders, notes) = match (all_folders, notes) {
        (Ok(all_folders), Ok(notes)) => (all_folders, notes),
        (Err(e), _) | (_, Err(e)) => {
            log_db_error("retrieve the top level folder", &e);
            return Err(GetFolderError::DbFailure);
        }
    };
    let mut folders = top_level_folders(&all_folders);
    sort_siblings(&mut folders);
    Ok(RootFolderResponse {
        folders: folders.into_iter().map(FolderApi::from).collect(),
        notes: notes.iter().map(NoteApi::from).collect(),
    })
}

/// builds the whole folder tree, top-level folders first. Siblings are ordered by sort order, then name.
///
/// A folder whose parent can't be found is shown at the top level
pub fn get_folder_tree() -> Result<Vec<FolderTreeNode>, GetFolderError> {
    let con = open_connection();
    let all_folders = folder_repository::get_all_folders(&con);
    close_connection(con);
    let all_folders = all_folders.map_err(|e| {
        log_db_error("retrieve all folders", &e);
        GetFolderError::DbFailure
    })?;
    let mut children_by_parent: HashMap<&str, Vec<&Folder>> = HashMap::new();
    for folder in all_folders.iter() {
        if let Some(parent_id) = folder.parent_id.as_deref() {
            children_by_parent.entry(parent_id).or_default().push(folder);
        }
    }
    let mut roots = top_level_folders(&all_folders);
    sort_siblings(&mut roots);
    Ok(roots
        .into_iter()
        .map(|root| build_tree_node(root, &children_by_parent))
        .collect())
}

/// creates a new folder with a generated id, placed after all of its new siblings
pub fn create_folder(request: &CreateFolderRequest) -> Result<FolderApi, CreateFolderError> {
    let name = validate_name(&request.name).ok_or(CreateFolderError::InvalidName)?;
    if !is_valid_color(request.color.as_deref()) {
        return Err(CreateFolderError::InvalidColor);
    }
    let mut con = open_connection();
    let result = with_write_transaction(
        &mut con,
        |e| {
            log_db_error("save folder", &e);
            CreateFolderError::DbFailure
        },
        |con| create_folder_internal(name, request, con),
    );
    close_connection(con);
    result
}

/// replaces the editable fields of a folder. If the parent changes, the move is validated the same way as [`move_folder`]
pub fn update_folder(request: &UpdateFolderRequest) -> Result<FolderApi, UpdateFolderError> {
    let name = validate_name(&request.name).ok_or(UpdateFolderError::InvalidName)?;
    if !is_valid_color(request.color.as_deref()) {
        return Err(UpdateFolderError::InvalidColor);
    }
    let mut con = open_connection();
    let result = with_write_transaction(&mut con, update_db_failure, |con| {
        let all_folders = load_active_folders(con).map_err(|_| UpdateFolderError::DbFailure)?;
        let existing = find_folder(&request.id, &all_folders).ok_or(UpdateFolderError::NotFound)?;
        let updated = Folder {
            name: name.to_string(),
            description: request.description.clone(),
            parent_id: request.parent_id.clone(),
            color: request.color.clone(),
            icon: request.icon.clone(),
            ..existing.clone()
        };
        save_folder_changes(existing, updated, request.sort_order, &all_folders, con)
    });
    close_connection(con);
    result.map(FolderApi::from)
}

/// moves a folder underneath another folder, or to the top level if the request has no parent id.
///
/// Moving a folder into itself or one of its own descendants is rejected with [`UpdateFolderError::NotAllowed`]
pub fn move_folder(id: &str, request: &MoveFolderRequest) -> Result<FolderApi, UpdateFolderError> {
    let mut con = open_connection();
    let result = with_write_transaction(&mut con, update_db_failure, |con| {
        let all_folders = load_active_folders(con).map_err(|_| UpdateFolderError::DbFailure)?;
        let existing = find_folder(id, &all_folders).ok_or(UpdateFolderError::NotFound)?;
        let updated = Folder {
            parent_id: request.parent_id.clone(),
            ..existing.clone()
        };
        save_folder_changes(existing, updated, request.sort_order, &all_folders, con)
    });
    close_connection(con);
    result.map(FolderApi::from)
}

/// soft-deletes the folder and everything underneath it, so that no active folder is left pointing at a deleted parent
pub fn delete_folder(id: &str) -> Result<(), DeleteFolderError> {
    let mut con = open_connection();
    let result = with_write_transaction(&mut con, delete_db_failure, |con| {
        delete_folder_internal(id, con)
    });
    close_connection(con);
    result
}

/// brings a soft-deleted folder back along with the descendants that were deleted with it.
/// If the folder's old parent is gone or still deleted, the folder is restored to the top level.
///
/// Fails with [`RestoreFolderError::AlreadyExists`] if an active sibling took the folder's name in the meantime
pub fn restore_folder(id: &str) -> Result<FolderApi, RestoreFolderError> {
    let mut con = open_connection();
    let result = with_write_transaction(
        &mut con,
        |e| {
            log_db_error(&format!("restore folder {id}"), &e);
            RestoreFolderError::DbFailure
        },
        |con| restore_folder_internal(id, con),
    );
    close_connection(con);
    result.map(FolderApi::from)
}

/// permanently removes the folder and every folder underneath it, deleted or not.
/// Notes inside of those folders are kept, but are no longer filed in any folder
pub fn hard_delete_folder(id: &str) -> Result<(), DeleteFolderError> {
    let mut con = open_connection();
    let result = with_write_transaction(&mut con, delete_db_failure, |con| {
        hard_delete_folder_internal(id, con)
    });
    close_connection(con);
    result
}

// private functions

fn get_folder_internal(id: &str, con: &Connection) -> Result<FolderResponse, GetFolderError> {
    let all_folders = load_active_folders(con).map_err(|_| GetFolderError::DbFailure)?;
    let folder = find_folder(id, &all_folders).ok_or(GetFolderError::NotFound)?;
    let child_folders = folder_repository::get_child_folders(Some(id), con).map_err(|e| {
        log_db_error(&format!("retrieve child folders of {id}"), &e);
        GetFolderError::DbFailure
    })?;
    let notes = note_repository::get_notes_in_folder(Some(id), con).map_err(|e| {
        log_db_error(&format!("retrieve notes in folder {id}"), &e);
        GetFolderError::DbFailure
    })?;
    Ok(FolderResponse {
        folder: FolderApi::from(folder),
        path: folder.path(&all_folders),
        depth: folder.depth(&all_folders),
        folders: child_folders.iter().map(FolderApi::from).collect(),
        notes: notes.iter().map(NoteApi::from).collect(),
    })
}

fn create_folder_internal(
    name: &str,
    request: &CreateFolderRequest,
    con: &Connection,
) -> Result<FolderApi, CreateFolderError> {
    let parent_id = request.parent_id.as_deref();
    if let Some(parent_id) = parent_id {
        match folder_repository::get_by_id(parent_id, con) {
            Ok(parent) if !parent.deleted => { /* no op */ }
            Ok(_) | Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(CreateFolderError::ParentNotFound)
            }
            Err(e) => {
                log_db_error(&format!("retrieve parent folder {parent_id}"), &e);
                return Err(CreateFolderError::DbFailure);
            }
        }
    }
    let siblings = folder_repository::get_child_folders(parent_id, con).map_err(|e| {
        log_db_error("retrieve sibling folders", &e);
        CreateFolderError::DbFailure
    })?;
    if siblings.iter().any(|f| names_match(&f.name, name)) {
        return Err(CreateFolderError::AlreadyExists);
    }
    let sort_order = folder_repository::get_next_sort_order(parent_id, con).map_err(|e| {
        log_db_error("determine folder sort order", &e);
        CreateFolderError::DbFailure
    })?;
    let now = chrono::offset::Local::now().naive_local();
    let folder = Folder {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: request.description.clone(),
        parent_id: request.parent_id.clone(),
        color: request.color.clone(),
        icon: request.icon.clone(),
        created_at: now,
        updated_at: now,
        deleted: false,
        sort_order,
        note_count: 0,
    };
    if let Err(e) = folder_repository::create_folder(&folder, con) {
        log_db_error(&format!("save folder {name}"), &e);
        return Err(CreateFolderError::DbFailure);
    }
    Ok(FolderApi::from(folder))
}

/// validates and persists `updated`, which must be `existing` with its changes applied.
/// This is the only place a folder's parent gets changed, and it always goes through [`Folder::can_move_to`]
fn save_folder_changes(
    existing: &Folder,
    mut updated: Folder,
    requested_sort_order: Option<i64>,
    all_folders: &[Folder],
    con: &Connection,
) -> Result<Folder, UpdateFolderError> {
    let new_parent_id = updated.parent_id.as_deref();
    let parent_changed = existing.parent_id != updated.parent_id;
    if let Some(parent_id) = new_parent_id.filter(|_| parent_changed) {
        if find_folder(parent_id, all_folders).is_none() {
            return Err(UpdateFolderError::ParentNotFound);
        }
    }
    if !existing.can_move_to(new_parent_id, all_folders) {
        log::info!(
            "Refusing to move folder {} into {new_parent_id:?}, that would create a cycle",
            existing.id
        );
        return Err(UpdateFolderError::NotAllowed);
    }
    let name_taken = all_folders.iter().any(|f| {
        f.id != existing.id
            && f.parent_id.as_deref() == new_parent_id
            && names_match(&f.name, &updated.name)
    });
    if name_taken {
        return Err(UpdateFolderError::AlreadyExists);
    }
    updated.sort_order = match requested_sort_order {
        Some(sort_order) => sort_order,
        None if parent_changed => folder_repository::get_next_sort_order(new_parent_id, con)
            .map_err(|e| {
                log_db_error("determine folder sort order", &e);
                UpdateFolderError::DbFailure
            })?,
        None => existing.sort_order,
    };
    updated.updated_at = chrono::offset::Local::now().naive_local();
    if let Err(e) = folder_repository::update_folder(&updated, con) {
        log_db_error(&format!("update folder {}", existing.id), &e);
        return Err(UpdateFolderError::DbFailure);
    }
    Ok(updated)
}

fn delete_folder_internal(id: &str, con: &Connection) -> Result<(), DeleteFolderError> {
    let all_folders = load_active_folders(con).map_err(|_| DeleteFolderError::DbFailure)?;
    let folder = find_folder(id, &all_folders).ok_or(DeleteFolderError::FolderNotFound)?;
    let mut to_delete = vec![folder];
    to_delete.extend(folder.descendants(&all_folders));
    let now = chrono::offset::Local::now().naive_local();
    let deleted = to_delete
        .iter()
        .try_for_each(|folder| folder_repository::set_deleted(&folder.id, true, now, con));
    deleted.map_err(|e| {
        log_db_error(&format!("soft delete folder {id}"), &e);
        DeleteFolderError::DbFailure
    })
}

fn restore_folder_internal(id: &str, con: &Connection) -> Result<Folder, RestoreFolderError> {
    let every_folder = folder_repository::get_all_folders_including_deleted(con).map_err(|e| {
        log_db_error("retrieve all folders", &e);
        RestoreFolderError::DbFailure
    })?;
    let folder = find_folder(id, &every_folder).ok_or(RestoreFolderError::FolderNotFound)?;
    if !folder.deleted {
        return Err(RestoreFolderError::NotDeleted);
    }
    let active_folders: Vec<&Folder> = every_folder.iter().filter(|f| !f.deleted).collect();
    let parent_is_active = folder.parent_id.as_deref().map_or(true, |parent_id| {
        active_folders.iter().any(|f| f.id == parent_id)
    });
    let restored_parent_id = if parent_is_active {
        folder.parent_id.as_deref()
    } else {
        None
    };
    let name_taken = active_folders.iter().any(|f| {
        f.parent_id.as_deref() == restored_parent_id && names_match(&f.name, &folder.name)
    });
    if name_taken {
        return Err(RestoreFolderError::AlreadyExists);
    }
    // a cascading delete stamps every folder it touches with the same time
    let deleted_with_folder: Vec<&Folder> = folder
        .descendants(&every_folder)
        .into_iter()
        .filter(|f| f.deleted && f.updated_at == folder.updated_at)
        .collect();
    let mut restored = Folder {
        deleted: false,
        updated_at: chrono::offset::Local::now().naive_local(),
        ..folder.clone()
    };
    if !parent_is_active {
        log::warn!("Parent of folder {id} is no longer available, restoring it to the top level");
        restored.parent_id = None;
        restored.sort_order = folder_repository::get_next_sort_order(None, con).map_err(|e| {
            log_db_error("determine folder sort order", &e);
            RestoreFolderError::DbFailure
        })?;
    }
    if let Err(e) = save_restored_folder(&restored, !parent_is_active, &deleted_with_folder, con) {
        log_db_error(&format!("restore folder {id}"), &e);
        return Err(RestoreFolderError::DbFailure);
    }
    Ok(restored)
}

fn save_restored_folder(
    restored: &Folder,
    moved_to_top_level: bool,
    descendants: &[&Folder],
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    if moved_to_top_level {
        folder_repository::update_folder(restored, con)?;
    }
    folder_repository::set_deleted(&restored.id, false, restored.updated_at, con)?;
    descendants.iter().try_for_each(|descendant| {
        folder_repository::set_deleted(&descendant.id, false, restored.updated_at, con)
    })
}

fn hard_delete_folder_internal(id: &str, con: &Connection) -> Result<(), DeleteFolderError> {
    let every_folder = folder_repository::get_all_folders_including_deleted(con).map_err(|e| {
        log_db_error("retrieve all folders", &e);
        DeleteFolderError::DbFailure
    })?;
    let folder = find_folder(id, &every_folder).ok_or(DeleteFolderError::FolderNotFound)?;
    let mut to_delete = vec![folder];
    to_delete.extend(folder.descendants(&every_folder));
    let deleted = to_delete.iter().try_for_each(|folder| {
        note_repository::unfile_notes_in_folder(&folder.id, con)?;
        folder_repository::delete_folder(&folder.id, con)
    });
    if let Err(e) = deleted {
        log_db_error(&format!("permanently delete folder {id}"), &e);
        return Err(DeleteFolderError::DbFailure);
    }
    log::info!("Permanently deleted folder {id} and {} descendants", to_delete.len() - 1);
    Ok(())
}

/// the complete collection of non-deleted folders, which every hierarchy check needs
fn load_active_folders(con: &Connection) -> Result<Vec<Folder>, rusqlite::Error> {
    folder_repository::get_all_folders(con).inspect_err(|e| {
        log_db_error("retrieve all folders", e);
    })
}

/// folders without a parent, plus folders whose parent can't be found
fn top_level_folders(all_folders: &[Folder]) -> Vec<&Folder> {
    all_folders
        .iter()
        .filter(|folder| match folder.parent_id.as_deref() {
            None => true,
            Some(parent_id) if find_folder(parent_id, all_folders).is_none() => {
                log::warn!(
                    "Folder {} references missing parent {parent_id}, placing it at the top level",
                    folder.id
                );
                true
            }
            Some(_) => false,
        })
        .collect()
}

fn find_folder<'a>(id: &str, folders: &'a [Folder]) -> Option<&'a Folder> {
    folders.iter().find(|f| f.id == id)
}

fn build_tree_node(folder: &Folder, children_by_parent: &HashMap<&str, Vec<&Folder>>) -> FolderTreeNode {
    let mut children = children_by_parent
        .get(folder.id.as_str())
        .cloned()
        .unwrap_or_default();
    sort_siblings(&mut children);
    FolderTreeNode {
        folder: FolderApi::from(folder),
        children: children
            .into_iter()
            .map(|child| build_tree_node(child, children_by_parent))
            .collect(),
    }
}

fn sort_siblings(folders: &mut [&Folder]) {
    folders.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// trims the name, returning `None` if nothing is left
fn validate_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn is_valid_color(color: Option<&str>) -> bool {
    color.map_or(true, |c| COLOR_REGEX.is_match(c))
}

/// folder names are unique within a parent regardless of case
fn names_match(first: &str, second: &str) -> bool {
    first.trim().to_lowercase() == second.trim().to_lowercase()
}

fn update_db_failure(e: rusqlite::Error) -> UpdateFolderError {
    log_db_error("update folder", &e);
    UpdateFolderError::DbFailure
}

fn delete_db_failure(e: rusqlite::Error) -> DeleteFolderError {
    log_db_error("delete folder", &e);
    DeleteFolderError::DbFailure
}

fn log_db_error(action: &str, e: &rusqlite::Error) {
    log::error!(
        "Failed to {action}! Error is {e:?}\n{}",
        Backtrace::force_capture()
    );
}
