//! User storage and loyalty counters.

use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::user::User;

use super::connection::Database;
use super::{from_unix_millis, to_unix_millis};

const SELECT_USER: &str = r"
    SELECT email, full_name, created_at, vip, reservation_count
    FROM users WHERE email = ?
";

const INSERT_USER: &str = r"
    INSERT INTO users (email, full_name, created_at, vip, reservation_count)
    VALUES (?, ?, ?, ?, ?)
";

const LIST_USERS: &str = r"
    SELECT email, full_name, created_at, vip, reservation_count
    FROM users ORDER BY created_at, email
";

// The counter only grows; the flag latches once the threshold is reached.
const RECORD_BOOKING: &str = r"
    UPDATE users
    SET reservation_count = reservation_count + 1,
        vip = CASE WHEN vip = 1 OR reservation_count + 1 >= ? THEN 1 ELSE 0 END
    WHERE email = ?
";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        email: row.get(0)?,
        full_name: row.get(1)?,
        created_at: from_unix_millis(2, row.get(2)?)?,
        vip: row.get(3)?,
        reservation_count: row.get(4)?,
    })
}

impl Database {
    /// Looks up a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_user(conn: &Connection, email: &str) -> Result<Option<User>> {
        match conn.query_row(SELECT_USER, [email], row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the email is already registered.
    pub fn insert_user(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            INSERT_USER,
            params![
                user.email,
                user.full_name,
                to_unix_millis(user.created_at),
                user.vip,
                user.reservation_count
            ],
        )?;
        Ok(())
    }

    /// Lists users in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        let mut stmt = conn.prepare(LIST_USERS)?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Counts one successful booking for the user and latches the VIP flag
    /// when the new count reaches `vip_threshold`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the user exists
    /// - `Ok(false)` if it does not
    pub fn record_booking(conn: &Connection, email: &str, vip_threshold: u32) -> Result<bool> {
        let rows = conn.execute(RECORD_BOOKING, params![vip_threshold, email])?;
        Ok(rows > 0)
    }
}
