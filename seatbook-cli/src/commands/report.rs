//! Report command implementation.

use crate::error::CliError;
use crate::utils::{print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::Summary;

/// Summarize users, seats and reservations.
#[derive(Args)]
pub struct ReportCommand {}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let summary = Summary::collect(session.db.connection())?;

        if global.json() {
            return print_json(&summary);
        }

        println!("Users registered: {}", summary.users_registered);
        for (email, count) in &summary.reservations_per_user {
            println!("  {email}: {count} reservation(s)");
        }

        println!("Seats:");
        for (class, occupancy) in &summary.occupancy {
            println!(
                "  {class}: {} occupied, {} free",
                occupancy.occupied, occupancy.free
            );
        }

        println!("Reservations:");
        println!("  manual selection: {}", summary.manual_selections);
        println!("  random selection: {}", summary.random_selections);
        println!("  modified:         {}", summary.modified);
        println!("  cancelled:        {}", summary.cancelled);
        Ok(())
    }
}
