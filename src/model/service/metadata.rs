/// outcome of comparing request credentials against the hash stored in the Metadata table
#[derive(PartialEq, Debug)]
pub enum CheckAuthResult {
    Valid,
    Invalid,
    /// no credentials have been stored yet, `POST /api/password` has to be called first
    Missing,
    DbError,
}
