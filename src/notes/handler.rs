use rocket::serde::json::Json;

use crate::guard::HeaderAuth;
use crate::model::error::note_errors::{
    CreateNoteError, DeleteNoteError, GetNoteError, UpdateNoteError,
};
use crate::model::guard::auth::ValidateResult;
use crate::model::request::note_requests::{CreateNoteRequest, UpdateNoteRequest};
use crate::model::response::note_responses::{
    CreateNoteResponse, DeleteNoteResponse, GetNoteResponse, UpdateNoteResponse,
};
use crate::model::response::BasicMessage;
use crate::notes::service;

static NO_PASSWORD_MESSAGE: &str = "No password has been set. You can set a username and password by making a POST to `/api/password`";
static BAD_CREDENTIALS_MESSAGE: &str = "Bad Credentials";

#[get("/<id>")]
pub fn get_note(id: &str, auth: HeaderAuth) -> GetNoteResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return GetNoteResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return GetNoteResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::get_note(id) {
        Ok(note) => GetNoteResponse::Success(Json::from(note)),
        Err(GetNoteError::NotFound) => GetNoteResponse::NoteNotFound(BasicMessage::new(
            "The note with the passed id could not be found.",
        )),
        Err(GetNoteError::DbFailure) => GetNoteResponse::NoteDbError(BasicMessage::new(
            "Failed to pull note info from database. Check server logs for details",
        )),
    }
}

#[post("/", data = "<note>")]
pub fn create_note(note: Json<CreateNoteRequest>, auth: HeaderAuth) -> CreateNoteResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return CreateNoteResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return CreateNoteResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::create_note(&note.into_inner()) {
        Ok(note) => CreateNoteResponse::Success(Json::from(note)),
        Err(CreateNoteError::FolderNotFound) => CreateNoteResponse::FolderNotFound(
            BasicMessage::new("No folder with the passed folderId was found."),
        ),
        Err(CreateNoteError::DbFailure) => CreateNoteResponse::NoteDbError(BasicMessage::new(
            "Failed to save note to the database. Check server logs for details",
        )),
    }
}

#[put("/", data = "<note>")]
pub fn update_note(note: Json<UpdateNoteRequest>, auth: HeaderAuth) -> UpdateNoteResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return UpdateNoteResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return UpdateNoteResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::update_note(&note.into_inner()) {
        Ok(note) => UpdateNoteResponse::Success(Json::from(note)),
        Err(UpdateNoteError::NotFound) => UpdateNoteResponse::NoteNotFound(BasicMessage::new(
            "The note with the passed id could not be found.",
        )),
        Err(UpdateNoteError::FolderNotFound) => UpdateNoteResponse::FolderNotFound(
            BasicMessage::new("No folder with the passed folderId was found."),
        ),
        Err(UpdateNoteError::DbFailure) => UpdateNoteResponse::NoteDbError(BasicMessage::new(
            "Failed to update note in the database. Check server logs for details",
        )),
    }
}

#[delete("/<id>")]
pub fn delete_note(id: &str, auth: HeaderAuth) -> DeleteNoteResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return DeleteNoteResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return DeleteNoteResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::delete_note(id) {
        Ok(()) => DeleteNoteResponse::Success(()),
        Err(DeleteNoteError::NotFound) => DeleteNoteResponse::NoteNotFound(BasicMessage::new(
            "The note with the passed id could not be found.",
        )),
        Err(DeleteNoteError::DbFailure) => DeleteNoteResponse::NoteDbError(BasicMessage::new(
            "Failed to delete note from the database. Check server logs for details",
        )),
    }
}
