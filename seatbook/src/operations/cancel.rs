//! Cancelling a reservation and releasing its seat.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::identity;
use crate::reservation::{ReservationId, ReservationState};
use crate::seat::SeatState;

use super::plan::{OperationPlan, PlanAction, Planner};

/// Plans a cancellation.
///
/// The identifier is checked even for a reservation that is already
/// cancelled. Cancelling twice succeeds with an empty plan and a warning;
/// nothing is written the second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelPlan {
    reservation_id: ReservationId,
    identifier: String,
}

impl CancelPlan {
    /// Creates a planner cancelling `reservation_id` for the holder of `identifier`.
    #[must_use]
    pub fn new(reservation_id: ReservationId, identifier: impl Into<String>) -> Self {
        Self {
            reservation_id,
            identifier: identifier.into(),
        }
    }
}

impl Planner for CancelPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.reservation_id;
        let reservation = Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;
        if !identity::verify(&self.identifier, &reservation.passenger.identifier) {
            return Err(Error::IdentityMismatch { reservation: id });
        }

        let plan = OperationPlan::new(format!("Cancel reservation {id}"));
        if reservation.is_cancelled() {
            return Ok(plan.add_warning(format!("reservation {id} was already cancelled")));
        }

        Ok(plan
            .add_action(PlanAction::SetReservationState {
                id,
                state: ReservationState::Cancelled,
            })
            .add_action(PlanAction::SetSeatState {
                seat: reservation.seat_id,
                state: SeatState::Free,
            }))
    }
}
