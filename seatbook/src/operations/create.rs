//! Booking a free seat.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::identity;
use crate::pricing::PricingRules;
use crate::reservation::NewReservation;
use crate::seat::SeatState;

use super::plan::{OperationPlan, PlanAction, Planner};

/// Plans the creation of an Active reservation.
///
/// Preconditions, checked in order:
/// 1. the passenger identifier is a structurally valid CUI (only when
///    identifier validation is enabled)
/// 2. the seat exists ([`Error::NotFound`])
/// 3. the seat is Free ([`Error::Conflict`])
/// 4. a Free seat has no live reservation ([`Error::DatabaseCorruption`])
/// 5. the user exists ([`Error::NotFound`])
///
/// The discount is decided from the user's loyalty as it stands before this
/// booking is counted.
#[derive(Debug, Clone)]
pub struct CreatePlan {
    request: NewReservation,
    rules: PricingRules,
    validate_identifier: bool,
}

impl CreatePlan {
    /// Creates a planner for `request` priced under `rules`.
    #[must_use]
    pub fn new(request: NewReservation, rules: &PricingRules) -> Self {
        Self {
            request,
            rules: *rules,
            validate_identifier: false,
        }
    }

    /// Requires the passenger identifier to be a structurally valid CUI.
    #[must_use]
    pub const fn with_identifier_validation(mut self, enabled: bool) -> Self {
        self.validate_identifier = enabled;
        self
    }
}

impl Planner for CreatePlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;

        if self.validate_identifier {
            identity::validate_cui(&request.passenger.identifier)?;
        }

        let seat = Database::get_seat(conn, &request.seat_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("seat {}", request.seat_id),
        })?;
        if !seat.is_free() {
            return Err(Error::Conflict {
                details: format!("seat {} is already occupied", seat.id),
            });
        }
        let live = Database::count_live_reservations(conn, &seat.id)?;
        if live > 0 {
            return Err(Error::DatabaseCorruption {
                details: format!("seat {} is free but has {live} live reservation(s)", seat.id),
            });
        }

        let user =
            Database::get_user(conn, &request.user_email)?.ok_or_else(|| Error::NotFound {
                resource: format!("user {}", request.user_email),
            })?;

        let rate = self.rules.discount_rate(&user);
        let total = self.rules.final_price(request.base_price, rate);

        let mut plan = OperationPlan::new(format!(
            "Book seat {} for {}",
            seat.number, request.user_email
        ))
        .add_action(PlanAction::InsertReservation {
            request: request.clone(),
            total,
        })
        .add_action(PlanAction::SetSeatState {
            seat: seat.id.clone(),
            state: SeatState::Occupied,
        })
        .add_action(PlanAction::RecordBooking {
            email: user.email.clone(),
            vip_threshold: self.rules.vip_threshold,
        });

        if rate.basis_points() > 0 {
            plan = plan.add_warning(format!("loyalty discount of {rate} applied"));
        }

        Ok(plan)
    }
}
