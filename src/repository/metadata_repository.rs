use std::backtrace::Backtrace;

use rusqlite::Connection;

use crate::guard::HeaderAuth;
use crate::model::service::metadata::CheckAuthResult;

/// returns the current version of the database as a String
pub fn get_version(con: &Connection) -> Result<String, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )
}

/// retrieves the hashed credentials for requests in the database
pub fn get_auth(con: &Connection) -> Result<String, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_auth_hash.sql"),
        [],
        |row| row.get(0),
    )
}

/// checks if the passed `auth` matches the hashed credentials in the database
pub fn check_auth(auth: &HeaderAuth, con: &Connection) -> Result<CheckAuthResult, rusqlite::Error> {
    let hash = auth.to_string();
    match get_auth(con) {
        Ok(db_hash) => {
            if db_hash.eq(&hash) {
                Ok(CheckAuthResult::Valid)
            } else {
                Ok(CheckAuthResult::Invalid)
            }
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(CheckAuthResult::Missing),
        Err(e) => {
            log::error!(
                "Failed to check auth in database: {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}

/// stores the hash of the passed credentials. The caller must make sure no credentials exist yet
pub fn set_auth(auth: &HeaderAuth, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut statement = con.prepare(include_str!("../assets/queries/metadata/set_auth_hash.sql"))?;
    match statement.execute([auth.to_string()]) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!(
                "Failed to set password. Nested exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(e)
        }
    }
}
