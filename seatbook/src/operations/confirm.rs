//! Confirming reservations, singly or as one atomic batch.

use std::collections::HashSet;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationState};

use super::plan::{OperationPlan, PlanAction, Planner};

/// Loads a reservation that may still change state.
fn load_live(conn: &Connection, id: ReservationId) -> Result<Reservation> {
    let reservation = Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("reservation {id}"),
    })?;
    if reservation.is_cancelled() {
        return Err(Error::AlreadyCancelled { reservation: id });
    }
    Ok(reservation)
}

/// Plans the confirmation of one reservation.
///
/// Confirming an already-confirmed reservation is harmless; the plan still
/// rewrites the state and carries a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPlan {
    reservation_id: ReservationId,
}

impl ConfirmPlan {
    /// Creates a planner confirming `reservation_id`.
    #[must_use]
    pub const fn new(reservation_id: ReservationId) -> Self {
        Self { reservation_id }
    }
}

impl Planner for ConfirmPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.reservation_id;
        let reservation = load_live(conn, id)?;

        let mut plan = OperationPlan::new(format!("Confirm reservation {id}")).add_action(
            PlanAction::SetReservationState {
                id,
                state: ReservationState::Confirmed,
            },
        );
        if reservation.state == ReservationState::Confirmed {
            plan = plan.add_warning(format!("reservation {id} was already confirmed"));
        }
        Ok(plan)
    }
}

/// Plans the confirmation of several reservations as one unit.
///
/// Every id is checked in caller order; the first missing or cancelled one
/// aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfirmPlan {
    reservation_ids: Vec<ReservationId>,
}

impl BatchConfirmPlan {
    /// Creates a planner for `reservation_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the list is empty or names the same
    /// reservation twice.
    pub fn new(reservation_ids: Vec<ReservationId>) -> Result<Self> {
        if reservation_ids.is_empty() {
            return Err(Error::Validation {
                field: "reservation_ids".into(),
                message: "at least one reservation is required".into(),
            });
        }

        let mut seen = HashSet::with_capacity(reservation_ids.len());
        if let Some(dup) = reservation_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(Error::Validation {
                field: "reservation_ids".into(),
                message: format!("reservation {dup} is listed more than once"),
            });
        }

        Ok(Self { reservation_ids })
    }

    /// The ids in caller order.
    #[must_use]
    pub fn reservation_ids(&self) -> &[ReservationId] {
        &self.reservation_ids
    }
}

impl Planner for BatchConfirmPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let mut plan = OperationPlan::new(format!(
            "Confirm {} reservations",
            self.reservation_ids.len()
        ));
        for &id in &self.reservation_ids {
            let reservation = load_live(conn, id)?;
            if reservation.state == ReservationState::Confirmed {
                plan = plan.add_warning(format!("reservation {id} was already confirmed"));
            }
            plan = plan.add_action(PlanAction::SetReservationState {
                id,
                state: ReservationState::Confirmed,
            });
        }
        Ok(plan)
    }
}
