//! Database schema definitions and SQL constants.
//!
//! This module contains the table definitions, indices and shared SQL
//! statements for the booking store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        email TEXT PRIMARY KEY NOT NULL,
        full_name TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        vip INTEGER NOT NULL DEFAULT 0,
        reservation_count INTEGER NOT NULL DEFAULT 0 CHECK (reservation_count >= 0)
    )";

/// SQL statement to create the seats table.
pub const CREATE_SEATS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS seats (
        id TEXT PRIMARY KEY NOT NULL,
        number TEXT NOT NULL,
        class TEXT NOT NULL CHECK (class IN ('business', 'economy')),
        state TEXT NOT NULL DEFAULT 'free' CHECK (state IN ('free', 'occupied'))
    )";

/// SQL statement to create the reservations table.
///
/// Prices are stored in cents and timestamps in Unix milliseconds.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        state TEXT NOT NULL CHECK (state IN ('active', 'confirmed', 'cancelled')),
        user_email TEXT NOT NULL REFERENCES users(email),
        seat_id TEXT NOT NULL REFERENCES seats(id),
        passenger_name TEXT NOT NULL,
        passenger_identifier TEXT NOT NULL,
        has_baggage INTEGER NOT NULL,
        selection TEXT NOT NULL CHECK (selection IN ('manual', 'random')),
        base_price INTEGER NOT NULL,
        total_price INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the modifications table.
pub const CREATE_MODIFICATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS modifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
        created_at INTEGER NOT NULL,
        surcharge INTEGER NOT NULL,
        description TEXT NOT NULL
    )";

/// At most one live reservation per seat.
///
/// The store rejects a second non-cancelled reservation on a seat even if a
/// caller bypasses the lifecycle checks.
pub const CREATE_LIVE_SEAT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_live_seat
    ON reservations(seat_id) WHERE state <> 'cancelled'";

/// SQL statement to create an index on the reservation owner.
pub const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_email)";

/// SQL statement to create an index on the modification owner.
pub const CREATE_MODIFICATION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_modifications_reservation ON modifications(reservation_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query.
pub const RESERVATION_COLUMNS: &str = "id, state, user_email, seat_id, passenger_name, \
    passenger_identifier, has_baggage, selection, base_price, total_price, created_at";
