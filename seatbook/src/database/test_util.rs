//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database and
//! operation test modules.

use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::{CabinClass, Money, NewReservation, Passenger, Seat, SeatId, User};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts a Free seat.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_seat(conn: &Connection, id: &str, class: CabinClass) -> Seat {
    let seat = Seat::new(SeatId::new(id).unwrap(), id, class);
    Database::insert_seat(conn, &seat).unwrap();
    seat
}

/// Inserts a user with no bookings.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_user(conn: &Connection, email: &str) -> User {
    let user = User::new(email, "Test User").unwrap();
    Database::insert_user(conn, &user).unwrap();
    user
}

/// A passenger with a valid CUI.
///
/// # Panics
///
/// Never in practice; the literal values are valid.
#[must_use]
pub fn test_passenger() -> Passenger {
    Passenger::new("Ana Lopez", "1234 56789 0101", false).unwrap()
}

/// A booking request for `seat` by `email` at `base_cents`.
///
/// # Panics
///
/// Panics if the seat id or email is invalid.
#[must_use]
pub fn booking_request(seat: &str, email: &str, base_cents: i64) -> NewReservation {
    NewReservation::builder(
        SeatId::new(seat).unwrap(),
        email,
        test_passenger(),
        Money::from_cents(base_cents),
    )
    .build()
    .unwrap()
}
