//! Database layer for persistent storage of users, seats and reservations.
//!
//! This module provides a SQLite-based store: connection management,
//! schema versioning, the write-transaction boundary and row-level
//! operations. Row-level operations are associated functions taking a
//! `&Connection`, so the same code runs against a plain connection or an
//! open [`rusqlite::Transaction`].
//!
//! # Examples
//!
//! ```no_run
//! use seatbook::database::{Database, DatabaseConfig};
//! use seatbook::{CabinClass, Seat, SeatId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
//!
//! let tx = db.begin_transaction().unwrap();
//! let seat = Seat::new(SeatId::new("A1").unwrap(), "A1", CabinClass::Economy);
//! Database::insert_seat(&tx, &seat).unwrap();
//! tx.commit().unwrap();
//!
//! for seat in Database::list_seats(db.connection(), None).unwrap() {
//!     println!("{} {}", seat.id, seat.state);
//! }
//! ```

use chrono::{DateTime, Utc};

mod config;
mod connection;
pub mod migrations;
mod reservations;
mod schema;
mod seats;
mod users;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use reservations::ReservationFilter;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

/// Converts a timestamp to Unix epoch milliseconds for storage.
pub(crate) fn to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

/// Converts stored Unix epoch milliseconds back to a timestamp.
pub(crate) fn from_unix_millis(column: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(column, millis)
    })
}

/// Wraps a domain parse failure for a stored column.
pub(crate) fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}
