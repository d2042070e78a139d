//! Moving a reservation to another seat of the same cabin class.

use chrono::Utc;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::identity;
use crate::pricing::PricingRules;
use crate::reservation::{Modification, ReservationId};
use crate::seat::{SeatId, SeatState};

use super::plan::{OperationPlan, PlanAction, Planner};

/// Options for a seat change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyOptions {
    /// The reservation to move.
    pub reservation_id: ReservationId,
    /// The seat to move to.
    pub target_seat: SeatId,
    /// Passenger identifier supplied by the caller.
    pub identifier: String,
    /// Free-text description; defaults to "Changed from <old> to <new>".
    pub description: Option<String>,
}

impl ModifyOptions {
    /// Creates options with the default description.
    #[must_use]
    pub fn new(
        reservation_id: ReservationId,
        target_seat: SeatId,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            reservation_id,
            target_seat,
            identifier: identifier.into(),
            description: None,
        }
    }

    /// Sets the modification description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

/// Plans a seat change.
///
/// Preconditions, checked in order, each aborting before any write:
/// the reservation exists and is not cancelled, the identifier matches, the
/// target seat exists and is Free, and it is in the same cabin class as the
/// current seat. The surcharge is computed from the original base price.
#[derive(Debug, Clone)]
pub struct ModifyPlan {
    options: ModifyOptions,
    rules: PricingRules,
}

impl ModifyPlan {
    /// Creates a planner for `options` priced under `rules`.
    #[must_use]
    pub fn new(options: ModifyOptions, rules: &PricingRules) -> Self {
        Self {
            options,
            rules: *rules,
        }
    }
}

impl Planner for ModifyPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let opts = &self.options;
        let id = opts.reservation_id;

        let reservation = Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;
        if reservation.is_cancelled() {
            return Err(Error::AlreadyCancelled { reservation: id });
        }
        if !identity::verify(&opts.identifier, &reservation.passenger.identifier) {
            return Err(Error::IdentityMismatch { reservation: id });
        }

        let target =
            Database::get_seat(conn, &opts.target_seat)?.ok_or_else(|| Error::NotFound {
                resource: format!("seat {}", opts.target_seat),
            })?;
        if !target.is_free() {
            return Err(Error::SeatUnavailable {
                seat: target.id.clone(),
            });
        }
        let live = Database::count_live_reservations(conn, &target.id)?;
        if live > 0 {
            return Err(Error::DatabaseCorruption {
                details: format!("seat {} is free but has {live} live reservation(s)", target.id),
            });
        }

        let current =
            Database::get_seat(conn, &reservation.seat_id)?.ok_or_else(|| {
                Error::DatabaseCorruption {
                    details: format!(
                        "reservation {id} references missing seat {}",
                        reservation.seat_id
                    ),
                }
            })?;
        if current.class != target.class {
            return Err(Error::ClassMismatch {
                target: target.id.clone(),
                target_class: target.class,
                current_class: current.class,
            });
        }

        let surcharge = self.rules.surcharge(reservation.base_price);
        let total = self.rules.new_total(reservation.total_price, surcharge)?;
        let description = opts
            .description
            .clone()
            .unwrap_or_else(|| format!("Changed from {} to {}", current.id, target.id));

        Ok(OperationPlan::new(format!(
            "Move reservation {id} from seat {} to {}",
            current.id, target.id
        ))
        .add_action(PlanAction::AppendModification(Modification {
            reservation_id: id,
            created_at: Utc::now(),
            surcharge,
            description,
        }))
        .add_action(PlanAction::MoveReservation {
            id,
            seat: target.id.clone(),
            total,
        })
        .add_action(PlanAction::SetSeatState {
            seat: current.id,
            state: SeatState::Free,
        })
        .add_action(PlanAction::SetSeatState {
            seat: target.id,
            state: SeatState::Occupied,
        }))
    }
}
