//! Registering users and provisioning seats.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::seat::Seat;
use crate::user::User;

use super::plan::{OperationPlan, PlanAction, Planner};

/// Plans the registration of a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserPlan {
    user: User,
}

impl RegisterUserPlan {
    /// Creates a planner registering `user`.
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self { user }
    }
}

impl Planner for RegisterUserPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        if Database::get_user(conn, &self.user.email)?.is_some() {
            return Err(Error::Conflict {
                details: format!("user {} is already registered", self.user.email),
            });
        }
        Ok(OperationPlan::new(format!("Register {}", self.user.email))
            .add_action(PlanAction::InsertUser(self.user.clone())))
    }
}

/// Plans adding a Free seat to the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSeatPlan {
    seat: Seat,
}

impl AddSeatPlan {
    /// Creates a planner adding `seat`.
    #[must_use]
    pub const fn new(seat: Seat) -> Self {
        Self { seat }
    }
}

impl Planner for AddSeatPlan {
    fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        if Database::get_seat(conn, &self.seat.id)?.is_some() {
            return Err(Error::Conflict {
                details: format!("seat {} already exists", self.seat.id),
            });
        }
        Ok(OperationPlan::new(format!("Add seat {}", self.seat.id))
            .add_action(PlanAction::InsertSeat(self.seat.clone())))
    }
}
