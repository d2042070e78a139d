//! Seat registry storage.
//!
//! Seat rows are only written inside a lifecycle transaction, together
//! with the reservation row that justifies the change.

use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::seat::{CabinClass, OccupancyViolation, Seat, SeatId, SeatState};

use super::connection::Database;
use super::conversion_error;

const SELECT_SEAT: &str = "SELECT id, number, class, state FROM seats WHERE id = ?";

const INSERT_SEAT: &str = "INSERT INTO seats (id, number, class, state) VALUES (?, ?, ?, ?)";

const UPDATE_SEAT_STATE: &str = "UPDATE seats SET state = ? WHERE id = ?";

const LIST_SEATS: &str = r"
    SELECT id, number, class, state
    FROM seats
    WHERE ?1 IS NULL OR class = ?1
    ORDER BY id
";

const COUNT_LIVE_RESERVATIONS: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE seat_id = ? AND state <> 'cancelled'
";

const SELECT_OCCUPANCY_VIOLATIONS: &str = r"
    SELECT s.id, s.state, COUNT(r.id) AS live
    FROM seats s
    LEFT JOIN reservations r ON r.seat_id = s.id AND r.state <> 'cancelled'
    GROUP BY s.id, s.state
    HAVING (s.state = 'free' AND live <> 0) OR (s.state = 'occupied' AND live <> 1)
    ORDER BY s.id
";

/// Deserializes a seat from a row of `id, number, class, state`.
fn row_to_seat(row: &Row<'_>) -> rusqlite::Result<Seat> {
    let id: String = row.get(0)?;
    let number: String = row.get(1)?;
    let class: String = row.get(2)?;
    let state: String = row.get(3)?;

    Ok(Seat {
        id: SeatId::new(id).map_err(|e| conversion_error(0, e))?,
        number,
        class: class.parse().map_err(|e| conversion_error(2, e))?,
        state: state.parse().map_err(|e| conversion_error(3, e))?,
    })
}

impl Database {
    /// Looks up a seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatbook::database::{Database, DatabaseConfig};
    /// use seatbook::SeatId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
    /// let seat = Database::get_seat(db.connection(), &SeatId::new("A1").unwrap()).unwrap();
    /// ```
    pub fn get_seat(conn: &Connection, id: &SeatId) -> Result<Option<Seat>> {
        match conn.query_row(SELECT_SEAT, [id.as_str()], row_to_seat) {
            Ok(seat) => Ok(Some(seat)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a seat.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if a seat with the same id exists.
    pub fn insert_seat(conn: &Connection, seat: &Seat) -> Result<()> {
        conn.execute(
            INSERT_SEAT,
            params![
                seat.id.as_str(),
                seat.number,
                seat.class.as_str(),
                seat.state.as_str()
            ],
        )?;
        Ok(())
    }

    /// Sets a seat's occupancy state.
    ///
    /// Only lifecycle transactions call this, next to the reservation write
    /// that justifies it.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the seat exists
    /// - `Ok(false)` if it does not
    pub fn set_seat_state(conn: &Connection, id: &SeatId, state: SeatState) -> Result<bool> {
        let rows = conn.execute(UPDATE_SEAT_STATE, params![state.as_str(), id.as_str()])?;
        Ok(rows > 0)
    }

    /// Lists seats, optionally restricted to one cabin class.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_seats(conn: &Connection, class: Option<CabinClass>) -> Result<Vec<Seat>> {
        let mut stmt = conn.prepare(LIST_SEATS)?;
        let seats = stmt
            .query_map([class.map(CabinClass::as_str)], row_to_seat)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(seats)
    }

    /// Counts the non-cancelled reservations referencing a seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_live_reservations(conn: &Connection, id: &SeatId) -> Result<u32> {
        let count: u32 = conn.query_row(COUNT_LIVE_RESERVATIONS, [id.as_str()], |row| row.get(0))?;
        Ok(count)
    }

    /// Finds every seat whose stored state disagrees with its live
    /// reservation count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_occupancy_violations(conn: &Connection) -> Result<Vec<OccupancyViolation>> {
        let mut stmt = conn.prepare(SELECT_OCCUPANCY_VIOLATIONS)?;
        let violations = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let state: String = row.get(1)?;
                Ok(OccupancyViolation {
                    seat_id: SeatId::new(id).map_err(|e| conversion_error(0, e))?,
                    state: state.parse().map_err(|e| conversion_error(1, e))?,
                    live_reservations: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_seat, seed_user};

    #[test]
    fn test_insert_and_get_seat() {
        let db = create_test_database();
        let seat = seed_seat(db.connection(), "A1", CabinClass::Economy);

        let loaded = Database::get_seat(db.connection(), &seat.id).unwrap().unwrap();
        assert_eq!(loaded, seat);
    }

    #[test]
    fn test_get_seat_not_found() {
        let db = create_test_database();
        let missing = Database::get_seat(db.connection(), &SeatId::new("Z9").unwrap()).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_duplicate_seat_is_conflict() {
        let db = create_test_database();
        let seat = seed_seat(db.connection(), "A1", CabinClass::Economy);
        let err = Database::insert_seat(db.connection(), &seat).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_set_seat_state() {
        let db = create_test_database();
        let seat = seed_seat(db.connection(), "A1", CabinClass::Economy);

        assert!(Database::set_seat_state(db.connection(), &seat.id, SeatState::Occupied).unwrap());
        let loaded = Database::get_seat(db.connection(), &seat.id).unwrap().unwrap();
        assert_eq!(loaded.state, SeatState::Occupied);

        let missing = SeatId::new("Z9").unwrap();
        assert!(!Database::set_seat_state(db.connection(), &missing, SeatState::Free).unwrap());
    }

    #[test]
    fn test_list_seats_by_class() {
        let db = create_test_database();
        seed_seat(db.connection(), "A1", CabinClass::Economy);
        seed_seat(db.connection(), "A2", CabinClass::Economy);
        seed_seat(db.connection(), "B1", CabinClass::Business);

        assert_eq!(Database::list_seats(db.connection(), None).unwrap().len(), 3);
        let business = Database::list_seats(db.connection(), Some(CabinClass::Business)).unwrap();
        assert_eq!(business.len(), 1);
        assert_eq!(business[0].id.as_str(), "B1");
    }

    #[test]
    fn test_occupancy_violations_detected() {
        let db = create_test_database();
        let conn = db.connection();
        seed_user(conn, "a@x.com");
        seed_seat(conn, "A1", CabinClass::Economy);
        seed_seat(conn, "A2", CabinClass::Economy);
        seed_seat(conn, "A3", CabinClass::Economy);

        // A1: free with a live reservation. A2: occupied with none. A3: consistent.
        conn.execute_batch(
            "INSERT INTO reservations (state, user_email, seat_id, passenger_name,
                 passenger_identifier, has_baggage, selection, base_price, total_price, created_at)
             VALUES ('active', 'a@x.com', 'A1', 'Ana', '1', 0, 'manual', 100, 100, 0);
             UPDATE seats SET state = 'occupied' WHERE id = 'A2';",
        )
        .unwrap();

        let violations = Database::find_occupancy_violations(conn).unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].seat_id.as_str(), "A1");
        assert_eq!(violations[0].state, SeatState::Free);
        assert_eq!(violations[0].live_reservations, 1);
        assert_eq!(violations[1].seat_id.as_str(), "A2");
        assert_eq!(violations[1].live_reservations, 0);

        assert_eq!(
            Database::count_live_reservations(conn, &SeatId::new("A1").unwrap()).unwrap(),
            1
        );
    }
}
