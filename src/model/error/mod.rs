pub mod folder_errors;
pub mod metadata_errors;
pub mod note_errors;
