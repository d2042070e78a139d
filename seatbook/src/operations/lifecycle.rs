//! The reservation lifecycle manager.
//!
//! Every operation runs as one write transaction: plan against the
//! transaction, execute the plan on it, read back the post-state, commit.
//! Notifications go out only after a successful commit.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::money::Money;
use crate::notify::{Notification, Recipient, ReservationSnapshot};
use crate::reservation::{NewReservation, Reservation, ReservationId};
use crate::seat::Seat;
use crate::user::User;

use super::cancel::CancelPlan;
use super::confirm::{BatchConfirmPlan, ConfirmPlan};
use super::context::BookingContext;
use super::create::CreatePlan;
use super::executor::{ExecutionResult, PlanExecutor};
use super::modify::{ModifyOptions, ModifyPlan};
use super::plan::Planner;
use super::provision::{AddSeatPlan, RegisterUserPlan};

/// Outcome of a cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    /// The reservation after the call.
    pub reservation: Reservation,
    /// Whether it had been cancelled before this call.
    pub already_cancelled: bool,
}

/// Outcome of a batch confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfirmation {
    /// Number of reservations confirmed.
    pub confirmed: usize,
    /// Sum of their totals.
    pub combined_total: Money,
    /// The confirmed reservations, in request order.
    pub reservations: Vec<Reservation>,
}

/// Runs lifecycle operations against one database connection.
///
/// Create one manager per worker; share the [`BookingContext`] between them.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use seatbook::database::{Database, DatabaseConfig};
/// use seatbook::notify::LogNotifier;
/// use seatbook::operations::{BookingContext, BookingRules, LifecycleManager};
/// use seatbook::{Money, NewReservation, Passenger, SeatId};
///
/// let ctx = BookingContext::new(BookingRules::default(), Arc::new(LogNotifier));
/// let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
///
/// let request = NewReservation::builder(
///     SeatId::new("A1").unwrap(),
///     "ana@example.com",
///     Passenger::new("Ana Lopez", "1234567890101", false).unwrap(),
///     Money::from_cents(25_000),
/// )
/// .build()
/// .unwrap();
///
/// let reservation = LifecycleManager::new(&mut db, &ctx).create(request).unwrap();
/// println!("booked #{} for {}", reservation.id, reservation.total_price);
/// ```
pub struct LifecycleManager<'a> {
    db: &'a mut Database,
    ctx: &'a BookingContext,
}

impl<'a> LifecycleManager<'a> {
    /// Creates a manager over `db` sharing `ctx`.
    #[must_use]
    pub fn new(db: &'a mut Database, ctx: &'a BookingContext) -> Self {
        Self { db, ctx }
    }

    /// Books a free seat.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown seat or user,
    /// [`Error::Conflict`] if the seat is taken (including by a concurrent
    /// booking), or a validation error for a malformed identifier when
    /// identifier validation is configured.
    pub fn create(&mut self, request: NewReservation) -> Result<Reservation> {
        let rules = *self.ctx.rules();
        let planner = CreatePlan::new(request, &rules.pricing)
            .with_identifier_validation(rules.require_valid_identifier);

        self.run(&planner, |conn, result| {
            let id = result.reservation_id.ok_or_else(|| Error::DatabaseCorruption {
                details: "booking plan inserted no reservation".into(),
            })?;
            load_reservation(conn, id)
        })
    }

    /// Moves a reservation to another seat of the same class.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`], [`Error::AlreadyCancelled`],
    /// [`Error::IdentityMismatch`], [`Error::SeatUnavailable`] or
    /// [`Error::ClassMismatch`]; nothing is written in any of those cases.
    pub fn modify(&mut self, options: ModifyOptions) -> Result<Reservation> {
        let id = options.reservation_id;
        let planner = ModifyPlan::new(options, &self.ctx.rules().pricing);

        let (recipient, snapshot) = self.run(&planner, |conn, _| {
            let snapshot = load_snapshot(conn, id)?;
            Ok((load_recipient(conn, &snapshot.reservation.user_email)?, snapshot))
        })?;

        let reservation = snapshot.reservation.clone();
        self.ctx.notify(Notification::Modification {
            recipient,
            snapshot,
        });
        Ok(reservation)
    }

    /// Cancels a reservation and frees its seat.
    ///
    /// Cancelling an already-cancelled reservation succeeds without
    /// touching any data or sending a notice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or [`Error::IdentityMismatch`].
    pub fn cancel(&mut self, id: ReservationId, identifier: &str) -> Result<CancelOutcome> {
        let planner = CancelPlan::new(id, identifier);

        let (already_cancelled, recipient, snapshot) = self.run(&planner, |conn, result| {
            let snapshot = load_snapshot(conn, id)?;
            let recipient = load_recipient(conn, &snapshot.reservation.user_email)?;
            Ok((result.actions_taken.is_empty(), recipient, snapshot))
        })?;

        let reservation = snapshot.reservation.clone();
        if !already_cancelled {
            self.ctx.notify(Notification::Cancellation {
                recipient,
                snapshot,
            });
        }
        Ok(CancelOutcome {
            reservation,
            already_cancelled,
        })
    }

    /// Confirms one reservation.
    ///
    /// The confirmation notice is skipped while the id is still in the
    /// dedup window from a recent batch confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] or [`Error::AlreadyCancelled`].
    pub fn confirm(&mut self, id: ReservationId) -> Result<Reservation> {
        let (recipient, snapshot) = self.run(&ConfirmPlan::new(id), |conn, _| {
            let snapshot = load_snapshot(conn, id)?;
            Ok((load_recipient(conn, &snapshot.reservation.user_email)?, snapshot))
        })?;

        let reservation = snapshot.reservation.clone();
        if self.ctx.dedup().contains(id) {
            log::debug!("confirmation notice for reservation {id} suppressed by recent batch");
        } else {
            self.ctx.notify(Notification::Confirmation {
                recipient,
                snapshot,
            });
        }
        Ok(reservation)
    }

    /// Confirms every listed reservation, or none.
    ///
    /// After commit the ids enter the dedup window, then one aggregate
    /// notice goes to the owner of the first reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty or repeating list, and
    /// [`Error::NotFound`] or [`Error::AlreadyCancelled`] for the first bad
    /// id; in every error case no reservation changes.
    pub fn confirm_batch(&mut self, ids: Vec<ReservationId>) -> Result<BatchConfirmation> {
        let planner = BatchConfirmPlan::new(ids)?;

        let (recipient, snapshots, combined_total) = self.run(&planner, |conn, _| {
            let snapshots = planner
                .reservation_ids()
                .iter()
                .map(|id| load_snapshot(conn, *id))
                .collect::<Result<Vec<_>>>()?;
            let combined_total = combined_total(&snapshots)?;
            // The planner guarantees at least one id.
            let first = &snapshots[0].reservation.user_email;
            Ok((load_recipient(conn, first)?, snapshots, combined_total))
        })?;

        let reservations: Vec<Reservation> =
            snapshots.iter().map(|s| s.reservation.clone()).collect();

        self.ctx
            .dedup()
            .mark_batch(planner.reservation_ids(), self.ctx.rules().dedup_ttl);
        self.ctx.notify(Notification::BatchConfirmation {
            recipient,
            snapshots,
            combined_total,
        });

        Ok(BatchConfirmation {
            confirmed: reservations.len(),
            combined_total,
            reservations,
        })
    }

    /// Registers a user and sends a welcome notice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the email is taken.
    pub fn register_user(&mut self, user: User) -> Result<User> {
        let planner = RegisterUserPlan::new(user.clone());
        self.run(&planner, |_, _| Ok(()))?;

        self.ctx.notify(Notification::UserRegistered {
            recipient: Recipient {
                email: user.email.clone(),
                display_name: user.full_name.clone(),
            },
        });
        Ok(user)
    }

    /// Adds a Free seat to the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if the seat id is taken.
    pub fn add_seat(&mut self, seat: Seat) -> Result<Seat> {
        let planner = AddSeatPlan::new(seat.clone());
        self.run(&planner, |_, _| Ok(()))?;
        Ok(seat)
    }

    /// Loads a reservation with its seat and modification history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn lookup(&self, id: ReservationId) -> Result<ReservationSnapshot> {
        load_snapshot(self.db.connection(), id)
    }

    /// Plans an operation and reports what it would do, without writing.
    ///
    /// The plan is built inside a write transaction that is rolled back, so
    /// the checks see the same state a real run would.
    ///
    /// # Errors
    ///
    /// Returns whatever error the real operation would fail with.
    pub fn preview(&mut self, planner: &dyn Planner) -> Result<ExecutionResult> {
        let tx = self.db.begin_transaction()?;
        let plan = planner.build_plan(&tx)?;
        let result = PlanExecutor::new(&tx).dry_run().execute(&plan)?;
        tx.rollback()?;
        Ok(result)
    }

    fn run<P, T, F>(&mut self, planner: &P, finish: F) -> Result<T>
    where
        P: Planner + ?Sized,
        F: FnOnce(&Connection, &ExecutionResult) -> Result<T>,
    {
        let tx = self.db.begin_transaction()?;
        let plan = planner.build_plan(&tx)?;
        log::debug!("{}: {} action(s)", plan.description, plan.len());
        for warning in &plan.warnings {
            log::info!("{warning}");
        }

        let result = PlanExecutor::new(&tx).execute(&plan)?;
        let output = finish(&*tx, &result)?;
        tx.commit()?;
        Ok(output)
    }
}

fn load_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
    Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("reservation {id}"),
    })
}

fn load_snapshot(conn: &Connection, id: ReservationId) -> Result<ReservationSnapshot> {
    let reservation = load_reservation(conn, id)?;
    let seat = Database::get_seat(conn, &reservation.seat_id)?.ok_or_else(|| {
        Error::DatabaseCorruption {
            details: format!(
                "reservation {id} references missing seat {}",
                reservation.seat_id
            ),
        }
    })?;
    Ok(ReservationSnapshot { reservation, seat })
}

fn combined_total(snapshots: &[ReservationSnapshot]) -> Result<Money> {
    snapshots.iter().try_fold(Money::ZERO, |sum, snapshot| {
        sum.checked_add(snapshot.reservation.total_price)
            .ok_or_else(|| Error::Validation {
                field: "reservation_ids".into(),
                message: format!("combined total exceeds the maximum amount {}", Money::MAX),
            })
    })
}

// Falls back to the bare address when the user row is gone.
fn load_recipient(conn: &Connection, email: &str) -> Result<Recipient> {
    let display_name = Database::get_user(conn, email)?
        .map_or_else(|| email.to_string(), |user| user.full_name);
    Ok(Recipient {
        email: email.to_string(),
        display_name,
    })
}
