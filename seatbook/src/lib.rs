#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # seatbook
//!
//! A transactional seat booking core for a single flight inventory.
//!
//! Users book free seats, move bookings to another seat of the same cabin
//! class, cancel them, and confirm them one at a time or in batches. Every
//! operation is one atomic SQLite transaction over the reservation, seat and
//! user rows, so concurrent callers can never both book the same seat.
//!
//! ## Core Types
//!
//! - [`Seat`], [`SeatId`], [`CabinClass`]: the seat registry
//! - [`Reservation`], [`NewReservation`], [`Passenger`]: bookings
//! - [`Money`], [`Rate`], [`PricingRules`]: exact cent arithmetic and pricing
//! - [`operations::LifecycleManager`]: create, modify, cancel and confirm
//! - [`DedupWindow`]: suppression of duplicate confirmation notices
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use seatbook::{Money, PricingRules, User};
//!
//! let rules = PricingRules::default();
//! let mut user = User::new("ana@example.com", "Ana Lopez").unwrap();
//! user.reservation_count = 5;
//!
//! let price = rules.final_price(Money::from_cents(25_000), rules.discount_rate(&user));
//! assert_eq!(price.to_string(), "225.00");
//! ```

pub mod config;
pub mod database;
pub mod dedup;
pub mod error;
pub mod identity;
pub mod logging;
pub mod money;
pub mod notify;
pub mod operations;
pub mod pricing;
pub mod report;
pub mod reservation;
pub mod seat;
pub mod user;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use dedup::DedupWindow;
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::{Money, Rate};
pub use notify::{Notification, Notifier, Outbox};
pub use operations::{
    BatchConfirmation, BookingContext, BookingRules, CancelOutcome, ExecutionResult,
    LifecycleManager, ModifyOptions, OperationPlan, PlanAction, PlanExecutor,
};
pub use pricing::PricingRules;
pub use report::Summary;
pub use reservation::{
    Modification, NewReservation, Passenger, Reservation, ReservationId, ReservationState,
    SelectionMethod, ValidationError,
};
pub use seat::{CabinClass, OccupancyViolation, Seat, SeatId, SeatState};
pub use user::User;
