//! Booking operations using the plan-execute pattern.
//!
//! Each operation is split into two phases:
//! 1. **Planning**: a [`Planner`] reads the store, checks every
//!    precondition and builds an [`OperationPlan`], or fails with the
//!    domain error for the first violated precondition
//! 2. **Execution**: a [`PlanExecutor`] applies the plan's actions
//!
//! [`LifecycleManager`] runs both phases inside one write transaction,
//! commits, and then hands notifications to the outbox. Planning and
//! execution can also be driven directly, for example to preview an
//! operation with a dry-run executor.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use seatbook::database::{Database, DatabaseConfig};
//! use seatbook::notify::LogNotifier;
//! use seatbook::operations::{BookingContext, BookingRules, LifecycleManager, ModifyOptions};
//! use seatbook::{ReservationId, SeatId};
//!
//! let ctx = BookingContext::new(BookingRules::default(), Arc::new(LogNotifier));
//! let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
//! let mut manager = LifecycleManager::new(&mut db, &ctx);
//!
//! let options = ModifyOptions::new(ReservationId::new(1), SeatId::new("A2").unwrap(), "1234567890101");
//! let moved = manager.modify(options).unwrap();
//! println!("new total {}", moved.total_price);
//!
//! let batch = manager
//!     .confirm_batch(vec![ReservationId::new(1), ReservationId::new(2)])
//!     .unwrap();
//! println!("confirmed {} for {}", batch.confirmed, batch.combined_total);
//! ```

pub mod cancel;
pub mod confirm;
pub mod context;
pub mod create;
pub mod executor;
pub mod init;
pub mod lifecycle;
pub mod modify;
pub mod plan;
pub mod provision;

pub use cancel::CancelPlan;
pub use confirm::{BatchConfirmPlan, ConfirmPlan};
pub use context::{BookingContext, BookingRules};
pub use create::CreatePlan;
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use lifecycle::{BatchConfirmation, CancelOutcome, LifecycleManager};
pub use modify::{ModifyOptions, ModifyPlan};
pub use plan::{OperationPlan, PlanAction, Planner};
pub use provision::{AddSeatPlan, RegisterUserPlan};
