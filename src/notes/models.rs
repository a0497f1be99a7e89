use chrono::NaiveDateTime;

/// represents a note in the Notes table of the database
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// `None` if the note isn't filed in any folder
    pub folder_id: Option<String>,
    pub pinned: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
