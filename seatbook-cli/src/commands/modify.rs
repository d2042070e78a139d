//! Modify command implementation.

use crate::error::CliError;
use crate::utils::{print_dry_run, print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::operations::ModifyPlan;
use seatbook::{LifecycleManager, ModifyOptions, ReservationId, SeatId};

/// Move a reservation to another seat of the same class.
#[derive(Args)]
pub struct ModifyCommand {
    /// Reservation to move
    #[arg(value_name = "RESERVATION")]
    pub reservation: ReservationId,

    /// Target seat
    #[arg(long, value_name = "SEAT")]
    pub seat: SeatId,

    /// Passenger government identifier
    #[arg(long, value_name = "ID")]
    pub identifier: String,

    /// Description recorded with the change
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ModifyCommand {
    /// Execute the modify command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = ModifyOptions::new(self.reservation, self.seat, self.identifier)
            .with_description(self.description);

        let mut session = Session::open(global)?;
        let mut manager = LifecycleManager::new(&mut session.db, &session.ctx);

        if self.dry_run {
            let planner = ModifyPlan::new(options, &session.ctx.rules().pricing);
            let result = manager.preview(&planner)?;
            return print_dry_run(&result, global);
        }

        let reservation = manager.modify(options)?;

        if global.json() {
            return print_json(&reservation);
        }

        if !global.quiet {
            let surcharge = reservation
                .modifications
                .last()
                .map(|m| m.surcharge.to_string())
                .unwrap_or_default();
            println!(
                "Reservation {} moved to seat {}: surcharge {surcharge}, total {}",
                reservation.id, reservation.seat_id, reservation.total_price
            );
        }
        Ok(())
    }
}
