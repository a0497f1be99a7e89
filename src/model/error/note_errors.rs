#[derive(PartialEq, Debug)]
pub enum GetNoteError {
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum CreateNoteError {
    /// the folder to file the note in does not exist or is deleted
    FolderNotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum UpdateNoteError {
    NotFound,
    /// the folder to move the note to does not exist or is deleted
    FolderNotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteNoteError {
    NotFound,
    DbFailure,
}
