//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{print_dry_run, print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::operations::CancelPlan;
use seatbook::{LifecycleManager, ReservationId};

/// Cancel a reservation and free its seat.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation to cancel
    #[arg(value_name = "RESERVATION")]
    pub reservation: ReservationId,

    /// Passenger government identifier
    #[arg(long, value_name = "ID")]
    pub identifier: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;
        let mut manager = LifecycleManager::new(&mut session.db, &session.ctx);

        if self.dry_run {
            let result = manager.preview(&CancelPlan::new(self.reservation, self.identifier))?;
            return print_dry_run(&result, global);
        }

        let outcome = manager.cancel(self.reservation, &self.identifier)?;

        if global.json() {
            return print_json(&serde_json::json!({
                "reservation": outcome.reservation,
                "already_cancelled": outcome.already_cancelled,
            }));
        }

        if !global.quiet {
            if outcome.already_cancelled {
                println!("Reservation {} was already cancelled", outcome.reservation.id);
            } else {
                println!(
                    "Cancelled reservation {}; seat {} is free",
                    outcome.reservation.id, outcome.reservation.seat_id
                );
            }
        }
        Ok(())
    }
}
