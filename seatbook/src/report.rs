//! Inventory and booking summary, and the occupancy audit.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::Serialize;

use crate::database::{Database, ReservationFilter};
use crate::error::Result;
use crate::reservation::{Reservation, ReservationState, SelectionMethod};
use crate::seat::{CabinClass, OccupancyViolation, SeatState};

/// Occupied and free seat counts for one cabin class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassOccupancy {
    /// Seats with a live reservation.
    pub occupied: usize,
    /// Seats without one.
    pub free: usize,
}

/// A point-in-time summary of users, seats and reservations.
///
/// Counts cover every reservation ever made, cancelled ones included, except
/// where a field says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Registered users.
    pub users_registered: usize,
    /// Reservations per user email (users with none are listed with 0).
    pub reservations_per_user: BTreeMap<String, usize>,
    /// Seat occupancy per cabin class.
    pub occupancy: BTreeMap<CabinClass, ClassOccupancy>,
    /// Reservations whose seat was picked by the user.
    pub manual_selections: usize,
    /// Reservations whose seat was assigned at random.
    pub random_selections: usize,
    /// Reservations with at least one modification.
    pub modified: usize,
    /// Cancelled reservations.
    pub cancelled: usize,
}

impl Summary {
    /// Collects the summary from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn collect(conn: &Connection) -> Result<Self> {
        let users = Database::list_users(conn)?;
        let seats = Database::list_seats(conn, None)?;
        let reservations = Database::list_reservations(conn, &ReservationFilter::default())?;

        let mut reservations_per_user: BTreeMap<String, usize> =
            users.iter().map(|u| (u.email.clone(), 0)).collect();
        for reservation in &reservations {
            *reservations_per_user
                .entry(reservation.user_email.clone())
                .or_default() += 1;
        }

        let mut occupancy: BTreeMap<CabinClass, ClassOccupancy> = CabinClass::ALL
            .iter()
            .map(|class| (*class, ClassOccupancy::default()))
            .collect();
        for seat in &seats {
            let entry = occupancy.entry(seat.class).or_default();
            match seat.state {
                SeatState::Occupied => entry.occupied += 1,
                SeatState::Free => entry.free += 1,
            }
        }

        let count = |pred: fn(&Reservation) -> bool| reservations.iter().filter(|r| pred(r)).count();

        Ok(Self {
            users_registered: users.len(),
            reservations_per_user,
            occupancy,
            manual_selections: count(|r| r.selection == SelectionMethod::Manual),
            random_selections: count(|r| r.selection == SelectionMethod::Random),
            modified: count(|r| !r.modifications.is_empty()),
            cancelled: count(|r| r.state == ReservationState::Cancelled),
        })
    }
}

/// Lists every seat whose occupancy disagrees with its live reservations.
///
/// An empty list means the store is consistent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn audit(conn: &Connection) -> Result<Vec<OccupancyViolation>> {
    let violations = Database::find_occupancy_violations(conn)?;
    for violation in &violations {
        log::warn!("{violation}");
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{booking_request, create_test_database, seed_seat, seed_user};
    use crate::money::Money;
    use crate::reservation::{Modification, NewReservation};
    use crate::seat::SeatId;

    fn book(db: &Database, request: &NewReservation) -> crate::ReservationId {
        let id = Database::insert_reservation(
            db.connection(),
            request,
            request.base_price,
            chrono::Utc::now(),
        )
        .unwrap();
        Database::set_seat_state(db.connection(), &request.seat_id, SeatState::Occupied).unwrap();
        id
    }

    #[test]
    fn test_summary_counts() {
        let db = create_test_database();
        let conn = db.connection();
        seed_user(conn, "a@x.com");
        seed_user(conn, "b@x.com");
        seed_user(conn, "idle@x.com");
        seed_seat(conn, "A1", CabinClass::Economy);
        seed_seat(conn, "A2", CabinClass::Economy);
        seed_seat(conn, "B1", CabinClass::Business);

        let first = book(&db, &booking_request("A1", "a@x.com", 100));
        let mut random = booking_request("B1", "b@x.com", 100);
        random.selection = SelectionMethod::Random;
        let second = book(&db, &random);

        Database::insert_modification(
            conn,
            &Modification {
                reservation_id: first,
                created_at: chrono::Utc::now(),
                surcharge: Money::from_cents(10),
                description: "moved".into(),
            },
        )
        .unwrap();
        Database::set_reservation_state(conn, second, ReservationState::Cancelled).unwrap();
        Database::set_seat_state(conn, &SeatId::new("B1").unwrap(), SeatState::Free).unwrap();

        let summary = Summary::collect(conn).unwrap();
        assert_eq!(summary.users_registered, 3);
        assert_eq!(summary.reservations_per_user["a@x.com"], 1);
        assert_eq!(summary.reservations_per_user["idle@x.com"], 0);
        assert_eq!(
            summary.occupancy[&CabinClass::Economy],
            ClassOccupancy { occupied: 1, free: 1 }
        );
        assert_eq!(
            summary.occupancy[&CabinClass::Business],
            ClassOccupancy { occupied: 0, free: 1 }
        );
        assert_eq!(summary.manual_selections, 1);
        assert_eq!(summary.random_selections, 1);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.cancelled, 1);
    }

    #[test]
    fn test_empty_store_lists_both_classes() {
        let db = create_test_database();
        let summary = Summary::collect(db.connection()).unwrap();
        assert_eq!(summary.occupancy.len(), 2);
        assert!(summary.reservations_per_user.is_empty());
    }

    #[test]
    fn test_audit_reports_violations() {
        let db = create_test_database();
        let conn = db.connection();
        seed_user(conn, "a@x.com");
        seed_seat(conn, "C3", CabinClass::Economy);
        assert!(audit(conn).unwrap().is_empty());

        Database::insert_reservation(
            conn,
            &booking_request("C3", "a@x.com", 100),
            Money::from_cents(100),
            chrono::Utc::now(),
        )
        .unwrap();
        let violations = audit(conn).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].seat_id.as_str(), "C3");
    }
}
