//! Error types for the seatbook library.
//!
//! This module provides the error hierarchy for every booking operation,
//! using `thiserror` for ergonomic error handling. Each lifecycle rejection
//! has its own variant so callers can tell the kinds apart.

use thiserror::Error;

use crate::reservation::ReservationId;
use crate::seat::{CabinClass, SeatId};

/// Result type alias for operations that may fail with a seatbook error.
///
/// # Examples
///
/// ```
/// use seatbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(5)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seatbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced seat, reservation or user does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The seat is already occupied, or the store rejected a conflicting write.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// The supplied passenger identifier does not match the stored one.
    #[error("passenger identifier does not match reservation {reservation}")]
    IdentityMismatch {
        /// The reservation whose identity check failed.
        reservation: ReservationId,
    },

    /// The target seat belongs to a different cabin class.
    #[error("seat {target} is {target_class} but the reservation is booked in {current_class}")]
    ClassMismatch {
        /// The requested target seat.
        target: SeatId,
        /// Cabin class of the target seat.
        target_class: CabinClass,
        /// Cabin class of the reservation's current seat.
        current_class: CabinClass,
    },

    /// The target seat of a modification is occupied.
    #[error("seat {seat} is not available")]
    SeatUnavailable {
        /// The occupied seat.
        seat: SeatId,
    },

    /// The reservation is cancelled and cannot transition any further.
    #[error("reservation {reservation} is cancelled")]
    AlreadyCancelled {
        /// The cancelled reservation.
        reservation: ReservationId,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored seat and reservation rows contradict each other.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref sqlite_err, ref message) = err {
            match sqlite_err.code {
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    return Self::Conflict {
                        details: format!("store is busy with a conflicting transaction: {err}"),
                    };
                }
                rusqlite::ErrorCode::ConstraintViolation
                    if message
                        .as_deref()
                        .is_some_and(|m| m.contains("UNIQUE")) =>
                {
                    return Self::Conflict {
                        details: format!("store rejected a duplicate row: {err}"),
                    };
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error reports a missing entity.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::Error;
    ///
    /// let err = Error::NotFound { resource: "seat Z9".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a seat or store conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if the error is a lifecycle rejection of the request itself
    /// (identity, class, availability or state-machine violation).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::IdentityMismatch { .. }
                | Self::ClassMismatch { .. }
                | Self::SeatUnavailable { .. }
                | Self::AlreadyCancelled { .. }
        )
    }
}
