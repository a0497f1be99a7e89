use std::backtrace::Backtrace;
use std::path::Path;
use std::time::Duration;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result, TransactionBehavior};

use crate::db_migrations::migrate_db;

pub mod metadata_repository;

/// how long a connection waits on another connection's write lock before giving up
static BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::NOTES_SERVER_CONFIG;

    match Connection::open_with_flags(
        Path::new(NOTES_SERVER_CONFIG.database.location.as_str()),
        OpenFlags::default(),
    ) {
        Ok(con) => with_busy_timeout(con),
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

/// every test thread gets its own database file so tests can run in parallel
#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    match Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default()) {
        Ok(con) => with_busy_timeout(con),
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

fn with_busy_timeout(con: Connection) -> Connection {
    if let Err(e) = con.busy_timeout(BUSY_TIMEOUT) {
        log::warn!("Failed to set busy timeout on database connection: {e:?}");
    }
    con
}

/// runs `action` inside a transaction that takes the write lock before anything is read, so that no other
/// connection can change the rows `action` validates against until it commits.
///
/// The transaction is committed if `action` returns `Ok`, and rolled back otherwise.
/// `on_db_error` converts a failure to begin or commit the transaction into the caller's error type
pub fn with_write_transaction<T, E>(
    con: &mut Connection,
    on_db_error: impl FnOnce(rusqlite::Error) -> E,
    action: impl FnOnce(&Connection) -> std::result::Result<T, E>,
) -> std::result::Result<T, E> {
    let tx = match con.transaction_with_behavior(TransactionBehavior::Immediate) {
        Ok(tx) => tx,
        Err(e) => return Err(on_db_error(e)),
    };
    let value = action(&*tx)?;
    tx.commit().map_err(on_db_error)?;
    Ok(value)
}

/// closes the connection, logging instead of panicking if sqlite refuses
pub fn close_connection(con: Connection) {
    if let Err((_, e)) = con.close() {
        log::error!(
            "Failed to close database connection: {e:?}\n{}",
            Backtrace::force_capture()
        );
    }
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    con.execute_batch(include_str!("../assets/init.sql"))
}

/// handles checking if the database exists and is up to the correct version.
/// If not, it either creates or upgrades the database accordingly
pub fn initialize_db() -> Result<()> {
    let con = open_connection();
    let table_version = match metadata_repository::get_version(&con) {
        Ok(value) => value.parse::<u64>().unwrap_or_else(|_| {
            log::warn!("Database version {value} is not a number, assuming v1");
            1
        }),
        Err(_) => {
            // tables haven't been created yet
            if let Err(e) = create_db(&con) {
                log::error!(
                    "Failed to create database tables: {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(e);
            }
            1
        }
    };
    let migrated = migrate_db(&con, table_version);
    if let Err((_, e)) = con.close() {
        log::error!("Failed to close database connection after initialization: {e:?}");
        return Err(e);
    }
    migrated
}
