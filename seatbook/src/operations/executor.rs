//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to an open transaction.

use chrono::Utc;
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::ReservationId;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Id assigned to a newly inserted reservation, if the plan created one.
    pub reservation_id: Option<ReservationId>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool, reservation_id: Option<ReservationId>) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation_id,
        }
    }
}

/// Executes operation plans against a connection or open transaction.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting the actions without writing). It never commits; the caller
/// owns the transaction.
///
/// # Examples
///
/// ```no_run
/// use seatbook::database::{Database, DatabaseConfig};
/// use seatbook::operations::{CreatePlan, PlanExecutor, Planner};
/// use seatbook::{Money, NewReservation, Passenger, PricingRules, SeatId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
/// let request = NewReservation::builder(
///     SeatId::new("A1").unwrap(),
///     "ana@example.com",
///     Passenger::new("Ana Lopez", "1234567890101", false).unwrap(),
///     Money::from_cents(25_000),
/// )
/// .build()
/// .unwrap();
///
/// let rules = PricingRules::default();
/// let tx = db.begin_transaction().unwrap();
/// let plan = CreatePlan::new(request, &rules).build_plan(&tx).unwrap();
/// let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert!(result.reservation_id.is_some());
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but does not
    /// modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails. Earlier actions of the same
    /// plan are not undone here; dropping the enclosing transaction rolls
    /// them back.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::from_plan(plan, true, None));
        }

        let mut reservation_id = None;
        for action in &plan.actions {
            log::debug!("executing: {}", action.description());
            if let Some(id) = self.execute_action(action)? {
                reservation_id = Some(id);
            }
        }

        Ok(ExecutionResult::from_plan(plan, false, reservation_id))
    }

    /// Executes a single action.
    ///
    /// Returns the new reservation id for inserts, `None` otherwise.
    fn execute_action(&self, action: &PlanAction) -> Result<Option<ReservationId>> {
        match action {
            PlanAction::InsertReservation { request, total } => {
                let id = Database::insert_reservation(self.conn, request, *total, Utc::now())?;
                return Ok(Some(id));
            }
            PlanAction::RecordBooking {
                email,
                vip_threshold,
            } => {
                let updated = Database::record_booking(self.conn, email, *vip_threshold)?;
                Self::require_row(updated, || format!("user {email}"))?;
            }
            PlanAction::SetSeatState { seat, state } => {
                let updated = Database::set_seat_state(self.conn, seat, *state)?;
                Self::require_row(updated, || format!("seat {seat}"))?;
            }
            PlanAction::SetReservationState { id, state } => {
                let updated = Database::set_reservation_state(self.conn, *id, *state)?;
                Self::require_row(updated, || format!("reservation {id}"))?;
            }
            PlanAction::MoveReservation { id, seat, total } => {
                let updated = Database::move_reservation(self.conn, *id, seat, *total)?;
                Self::require_row(updated, || format!("reservation {id}"))?;
            }
            PlanAction::AppendModification(modification) => {
                Database::insert_modification(self.conn, modification)?;
            }
            PlanAction::InsertUser(user) => {
                Database::insert_user(self.conn, user)?;
            }
            PlanAction::InsertSeat(seat) => {
                Database::insert_seat(self.conn, seat)?;
            }
        }
        Ok(None)
    }

    fn require_row(updated: bool, what: impl FnOnce() -> String) -> Result<()> {
        if updated {
            Ok(())
        } else {
            Err(Error::Conflict {
                details: format!("{} changed during execution", what()),
            })
        }
    }
}
