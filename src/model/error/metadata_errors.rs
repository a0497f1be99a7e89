/// failures when storing the server's credentials
#[derive(PartialEq, Debug)]
pub enum CreatePasswordError {
    /// credentials can only be set once
    AlreadyExists,
    Failure,
}
