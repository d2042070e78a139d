//! Confirm commands: single and batch.

use crate::error::CliError;
use crate::utils::{print_dry_run, print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::operations::{BatchConfirmPlan, ConfirmPlan};
use seatbook::{LifecycleManager, ReservationId};

/// Confirm one reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation to confirm
    #[arg(value_name = "RESERVATION")]
    pub reservation: ReservationId,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

/// Confirm several reservations at once, or none of them.
#[derive(Args)]
pub struct ConfirmBatchCommand {
    /// Reservations to confirm, in notification order
    #[arg(value_name = "RESERVATION", required = true, num_args = 1..)]
    pub reservations: Vec<ReservationId>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;
        let mut manager = LifecycleManager::new(&mut session.db, &session.ctx);

        if self.dry_run {
            let result = manager.preview(&ConfirmPlan::new(self.reservation))?;
            return print_dry_run(&result, global);
        }

        let reservation = manager.confirm(self.reservation)?;

        if global.json() {
            return print_json(&reservation);
        }
        if !global.quiet {
            println!(
                "Confirmed reservation {} (seat {}, total {})",
                reservation.id, reservation.seat_id, reservation.total_price
            );
        }
        Ok(())
    }
}

impl ConfirmBatchCommand {
    /// Execute the confirm-batch command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;
        let mut manager = LifecycleManager::new(&mut session.db, &session.ctx);

        if self.dry_run {
            let result = manager.preview(&BatchConfirmPlan::new(self.reservations)?)?;
            return print_dry_run(&result, global);
        }

        let batch = manager.confirm_batch(self.reservations)?;

        if global.json() {
            return print_json(&serde_json::json!({
                "confirmed": batch.confirmed,
                "combined_total": batch.combined_total,
                "reservations": batch.reservations,
            }));
        }
        if !global.quiet {
            println!(
                "Confirmed {} reservation(s), combined total {}",
                batch.confirmed, batch.combined_total
            );
        }
        Ok(())
    }
}
