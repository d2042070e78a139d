//! Reservation and modification storage.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::money::Money;
use crate::reservation::{
    Modification, NewReservation, Passenger, Reservation, ReservationId, ReservationState,
};
use crate::seat::SeatId;

use super::connection::Database;
use super::schema::RESERVATION_COLUMNS;
use super::{conversion_error, from_unix_millis, to_unix_millis};

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (state, user_email, seat_id, passenger_name, passenger_identifier, has_baggage,
     selection, base_price, total_price, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_STATE: &str = "UPDATE reservations SET state = ? WHERE id = ?";

const UPDATE_SEAT_AND_TOTAL: &str =
    "UPDATE reservations SET seat_id = ?, total_price = ? WHERE id = ? AND state <> 'cancelled'";

const INSERT_MODIFICATION: &str = r"
    INSERT INTO modifications (reservation_id, created_at, surcharge, description)
    VALUES (?, ?, ?, ?)
";

const SELECT_MODIFICATIONS: &str = r"
    SELECT reservation_id, created_at, surcharge, description
    FROM modifications
    WHERE reservation_id = ?
    ORDER BY id
";

/// Filter for [`Database::list_reservations`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations owned by this user.
    pub user_email: Option<String>,
    /// Only reservations in this state.
    pub state: Option<ReservationState>,
}

impl ReservationFilter {
    /// Restricts the listing to one user.
    #[must_use]
    pub fn with_user(mut self, email: Option<String>) -> Self {
        self.user_email = email;
        self
    }

    /// Restricts the listing to one state.
    #[must_use]
    pub const fn with_state(mut self, state: Option<ReservationState>) -> Self {
        self.state = state;
        self
    }
}

/// Deserializes a reservation row (without modifications).
///
/// Expects the columns in [`RESERVATION_COLUMNS`] order.
fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let state: String = row.get(1)?;
    let seat_id: String = row.get(3)?;
    let selection: String = row.get(7)?;

    Ok(Reservation {
        id: ReservationId::new(row.get(0)?),
        state: state.parse().map_err(|e| conversion_error(1, e))?,
        user_email: row.get(2)?,
        seat_id: SeatId::new(seat_id).map_err(|e| conversion_error(3, e))?,
        passenger: Passenger {
            name: row.get(4)?,
            identifier: row.get(5)?,
            has_baggage: row.get(6)?,
        },
        selection: selection.parse().map_err(|e| conversion_error(7, e))?,
        base_price: Money::from_cents(row.get(8)?),
        total_price: Money::from_cents(row.get(9)?),
        created_at: from_unix_millis(10, row.get(10)?)?,
        modifications: Vec::new(),
    })
}

fn row_to_modification(row: &Row<'_>) -> rusqlite::Result<Modification> {
    Ok(Modification {
        reservation_id: ReservationId::new(row.get(0)?),
        created_at: from_unix_millis(1, row.get(1)?)?,
        surcharge: Money::from_cents(row.get(2)?),
        description: row.get(3)?,
    })
}

impl Database {
    /// Inserts an Active reservation and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the seat already has a live
    /// reservation, or a database error if the seat or user row is missing.
    pub fn insert_reservation(
        conn: &Connection,
        request: &NewReservation,
        total_price: Money,
        created_at: DateTime<Utc>,
    ) -> Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                ReservationState::Active.as_str(),
                request.user_email,
                request.seat_id.as_str(),
                request.passenger.name,
                request.passenger.identifier,
                request.passenger.has_baggage,
                request.selection.as_str(),
                request.base_price.cents(),
                total_price.cents(),
                to_unix_millis(created_at),
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Loads a reservation with its modification history.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails (other than "not found").
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatbook::database::{Database, DatabaseConfig};
    /// use seatbook::ReservationId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
    /// let found = Database::get_reservation(db.connection(), ReservationId::new(1)).unwrap();
    /// ```
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        let Some(mut reservation) = conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?
        else {
            return Ok(None);
        };

        reservation.modifications = Self::list_modifications(conn, id)?;
        Ok(Some(reservation))
    }

    /// Lists reservations matching `filter`, oldest first, each with its
    /// modification history.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE (?1 IS NULL OR user_email = ?1) AND (?2 IS NULL OR state = ?2)
             ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut reservations = stmt
            .query_map(
                params![
                    filter.user_email.as_deref(),
                    filter.state.map(ReservationState::as_str)
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for reservation in &mut reservations {
            reservation.modifications = Self::list_modifications(conn, reservation.id)?;
        }
        Ok(reservations)
    }

    /// Sets a reservation's lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation exists
    /// - `Ok(false)` if it does not
    pub fn set_reservation_state(
        conn: &Connection,
        id: ReservationId,
        state: ReservationState,
    ) -> Result<bool> {
        let rows = conn.execute(UPDATE_STATE, params![state.as_str(), id.value()])?;
        Ok(rows > 0)
    }

    /// Points a live reservation at a new seat with a new total.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the target seat already has a
    /// live reservation.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a live reservation was updated
    /// - `Ok(false)` if none exists with that id
    pub fn move_reservation(
        conn: &Connection,
        id: ReservationId,
        seat: &SeatId,
        total_price: Money,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_SEAT_AND_TOTAL,
            params![seat.as_str(), total_price.cents(), id.value()],
        )?;
        Ok(rows > 0)
    }

    /// Appends a modification record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the owning
    /// reservation does not exist.
    pub fn insert_modification(conn: &Connection, modification: &Modification) -> Result<()> {
        conn.execute(
            INSERT_MODIFICATION,
            params![
                modification.reservation_id.value(),
                to_unix_millis(modification.created_at),
                modification.surcharge.cents(),
                modification.description,
            ],
        )?;
        Ok(())
    }

    /// Lists a reservation's modifications, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_modifications(conn: &Connection, id: ReservationId) -> Result<Vec<Modification>> {
        let mut stmt = conn.prepare(SELECT_MODIFICATIONS)?;
        let modifications = stmt
            .query_map([id.value()], row_to_modification)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(modifications)
    }
}
