//! Plan types for booking operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use rusqlite::Connection;

use crate::error::Result;
use crate::money::Money;
use crate::reservation::{Modification, NewReservation, ReservationId, ReservationState};
use crate::seat::{Seat, SeatId, SeatState};
use crate::user::User;

/// A single action to be taken during plan execution.
///
/// Each action corresponds to one row-level write. The planner has already
/// checked every precondition, so during execution an action that touches
/// no row means the data changed underneath the transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Insert an Active reservation with its computed total.
    InsertReservation {
        /// The booking request.
        request: NewReservation,
        /// Price after discount.
        total: Money,
    },

    /// Count a booking towards the user's loyalty and latch VIP at the threshold.
    RecordBooking {
        /// The booking user.
        email: String,
        /// Count at which the VIP flag is set.
        vip_threshold: u32,
    },

    /// Change a seat's occupancy.
    SetSeatState {
        /// The seat to update.
        seat: SeatId,
        /// The new occupancy.
        state: SeatState,
    },

    /// Change a reservation's lifecycle state.
    SetReservationState {
        /// The reservation to update.
        id: ReservationId,
        /// The new state.
        state: ReservationState,
    },

    /// Point a reservation at another seat with a new total.
    MoveReservation {
        /// The reservation to move.
        id: ReservationId,
        /// The target seat.
        seat: SeatId,
        /// Total after the surcharge.
        total: Money,
    },

    /// Append a modification record.
    AppendModification(Modification),

    /// Register a user.
    InsertUser(User),

    /// Provision a seat.
    InsertSeat(Seat),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::InsertReservation { request, total } => format!(
                "Create reservation on seat {} for {} at {total}",
                request.seat_id, request.user_email
            ),
            Self::RecordBooking { email, .. } => {
                format!("Count booking towards loyalty of {email}")
            }
            Self::SetSeatState { seat, state } => format!("Mark seat {seat} {state}"),
            Self::SetReservationState { id, state } => {
                format!("Mark reservation {id} {state}")
            }
            Self::MoveReservation { id, seat, total } => {
                format!("Move reservation {id} to seat {seat} with total {total}")
            }
            Self::AppendModification(m) => format!(
                "Record modification of reservation {} ({}, surcharge {})",
                m.reservation_id, m.description, m.surcharge
            ),
            Self::InsertUser(user) => format!("Register user {}", user.email),
            Self::InsertSeat(seat) => format!("Add {} seat {}", seat.class, seat.id),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book seat A1");
    /// assert_eq!(plan.description, "Book seat A1");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::operations::{OperationPlan, PlanAction};
    /// use seatbook::{SeatId, SeatState};
    ///
    /// let plan = OperationPlan::new("Test").add_action(PlanAction::SetSeatState {
    ///     seat: SeatId::new("A1").unwrap(),
    ///     state: SeatState::Occupied,
    /// });
    ///
    /// assert_eq!(plan.actions.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Something that can turn a request into an [`OperationPlan`] by reading
/// the store.
///
/// Planners only read; all writes happen in the executor. Run both against
/// the same open transaction so the checks and the writes see one snapshot.
pub trait Planner {
    /// Checks preconditions and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns the domain error for the first violated precondition, or a
    /// database error if a read fails.
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan>;
}
