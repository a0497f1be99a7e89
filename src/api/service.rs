use std::backtrace::Backtrace;

use crate::guard::HeaderAuth;
use crate::model::error::metadata_errors::CreatePasswordError;
use crate::model::request::NewAuth;
use crate::model::service::metadata::CheckAuthResult;
use crate::repository::metadata_repository;
use crate::repository::{close_connection, open_connection};

/// saves the hash of the passed credentials. Fails if credentials have already been set
pub fn create_password(auth: NewAuth) -> Result<(), CreatePasswordError> {
    let auth = HeaderAuth {
        username: auth.username,
        password: auth.password,
    };
    let con = open_connection();
    let result = match metadata_repository::get_auth(&con) {
        Ok(_) => Err(CreatePasswordError::AlreadyExists),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            metadata_repository::set_auth(&auth, &con).map_err(|_| CreatePasswordError::Failure)
        }
        Err(e) => {
            log::error!(
                "Failed to check auth in database: {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreatePasswordError::Failure)
        }
    };
    close_connection(con);
    result
}

/// Checks if the passed `auth` object matches the password in the database
pub fn check_auth(auth: &HeaderAuth) -> CheckAuthResult {
    let con = open_connection();
    let result = metadata_repository::check_auth(auth, &con);
    close_connection(con);
    result.unwrap_or(CheckAuthResult::DbError)
}
