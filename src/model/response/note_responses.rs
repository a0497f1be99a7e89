use chrono::NaiveDateTime;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::response::{BasicMessage, NoContent};
use crate::notes::Note;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct NoteApi {
    pub id: String,
    pub title: String,
    pub content: String,
    pub folder_id: Option<String>,
    pub pinned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&Note> for NoteApi {
    fn from(value: &Note) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
            content: value.content.clone(),
            folder_id: value.folder_id.clone(),
            pinned: value.pinned,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Note> for NoteApi {
    fn from(value: Note) -> Self {
        Self::from(&value)
    }
}

#[derive(Responder)]
pub enum GetNoteResponse {
    #[response(status = 404, content_type = "json")]
    NoteNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    NoteDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<NoteApi>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum CreateNoteResponse {
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    NoteDbError(Json<BasicMessage>),
    #[response(status = 201)]
    Success(Json<NoteApi>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum UpdateNoteResponse {
    #[response(status = 404, content_type = "json")]
    NoteNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    NoteDbError(Json<BasicMessage>),
    #[response(status = 200)]
    Success(Json<NoteApi>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DeleteNoteResponse {
    #[response(status = 404, content_type = "json")]
    NoteNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    NoteDbError(Json<BasicMessage>),
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 401)]
    Unauthorized(String),
}
