use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub name: String,
    pub description: Option<String>,
    /// `None` creates a top-level folder
    pub parent_id: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// replaces every editable field of a folder. A changed `parent_id` is a move, and is validated as one
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    /// keeps the current position if not passed
    pub sort_order: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct MoveFolderRequest {
    /// `None` moves the folder to the top level
    pub parent_id: Option<String>,
    /// the folder is placed after its new siblings if not passed
    pub sort_order: Option<i64>,
}
