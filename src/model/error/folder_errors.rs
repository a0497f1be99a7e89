#[derive(PartialEq, Debug)]
pub enum GetFolderError {
    /// no folder with that id exists, or it has been deleted
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// a folder with the name in the selected parent already exists
    AlreadyExists,
    /// the database failed to save the folder
    DbFailure,
    /// the requested parent folder does not exist
    ParentNotFound,
    /// the name is empty or only whitespace
    InvalidName,
    /// the color is not a `#RRGGBB` hex string
    InvalidColor,
}

#[derive(PartialEq, Debug)]
pub enum UpdateFolderError {
    /// a folder with the name in the selected parent already exists
    AlreadyExists,
    /// the database failed to update the folder
    DbFailure,
    /// the requested parent folder does not exist
    ParentNotFound,
    /// The folder could not be found
    NotFound,
    /// The user attempted to do an illegal action, such as moving a parent folder into its own child
    NotAllowed,
    InvalidName,
    InvalidColor,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFolderError {
    /// database could not execute the query
    DbFailure,
    /// folder not in the repository
    FolderNotFound,
}

#[derive(PartialEq, Debug)]
pub enum RestoreFolderError {
    DbFailure,
    FolderNotFound,
    /// the folder exists but was never deleted
    NotDeleted,
    /// an active folder with the same name now lives where the folder would be restored to
    AlreadyExists,
}
