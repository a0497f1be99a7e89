use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// `None` leaves the note unfiled
    pub folder_id: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub folder_id: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}
