//! Database schema management and migrations.
//!
//! This module handles database schema initialization, version checking,
//! and migrations.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_LIVE_SEAT_INDEX, CREATE_METADATA_TABLE, CREATE_MODIFICATIONS_TABLE,
    CREATE_MODIFICATION_INDEX, CREATE_RESERVATIONS_TABLE, CREATE_SEATS_TABLE,
    CREATE_USERS_TABLE, CREATE_USER_INDEX, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates the users, seats, reservations and modifications tables, their
/// indices and the schema version row. Every statement is idempotent, so two
/// processes racing to initialize the same file both succeed.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use seatbook::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in [
        CREATE_METADATA_TABLE,
        CREATE_USERS_TABLE,
        CREATE_SEATS_TABLE,
        CREATE_RESERVATIONS_TABLE,
        CREATE_MODIFICATIONS_TABLE,
        CREATE_LIVE_SEAT_INDEX,
        CREATE_USER_INDEX,
        CREATE_MODIFICATION_INDEX,
    ] {
        conn.execute(statement, [])?;
    }

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    log::debug!("initialized booking schema version {CURRENT_SCHEMA_VERSION}");

    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" (which indicates version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            // Database exists but no schema - needs initialization
            Ok(0)
        }
        Err(e) => {
            // Check if it's a "no such table" error
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    // Table doesn't exist yet
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database (version 0) is initialized. Any other version must match
/// [`CURRENT_SCHEMA_VERSION`] exactly.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version differs,
/// or a database error if a query or the initialization fails.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use seatbook::database::migrations::check_schema_compatibility;
///
/// let conn = Connection::open_in_memory().unwrap();
/// check_schema_compatibility(&conn).unwrap();
/// ```
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        return initialize_schema(conn);
    }

    if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
