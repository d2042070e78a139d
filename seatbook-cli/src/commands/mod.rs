//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory, database and configuration file
//! - `user`: Register and list users
//! - `seat`: Add and list seats
//! - `book`: Book a free seat
//! - `modify`: Move a reservation to another seat
//! - `cancel`: Cancel a reservation
//! - `confirm`, `confirm-batch`: Confirm one or several reservations
//! - `show`: Show one reservation
//! - `list`: List reservations
//! - `report`: Summarize the store
//! - `audit`: Check occupancy consistency
//! - `validate`: Validate configuration
//! - `completions`: Generate shell completion scripts

pub mod audit;
pub mod book;
pub mod cancel;
pub mod completions;
pub mod confirm;
pub mod init;
pub mod list;
pub mod modify;
pub mod report;
pub mod seat;
pub mod show;
pub mod user;
pub mod validate;

pub use audit::AuditCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use confirm::{ConfirmBatchCommand, ConfirmCommand};
pub use init::InitCommand;
pub use list::ListCommand;
pub use modify::ModifyCommand;
pub use report::ReportCommand;
pub use seat::SeatCommand;
pub use show::ShowCommand;
pub use user::UserCommand;
pub use validate::ValidateCommand;
