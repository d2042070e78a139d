//! Audit command implementation.
//!
//! Runs SQLite's integrity check, then compares every seat with its live
//! reservations. Exits with the corruption code on any finding.

use crate::error::CliError;
use crate::utils::{print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::report;

/// Check that seat occupancy agrees with live reservations.
#[derive(Args)]
pub struct AuditCommand {}

impl AuditCommand {
    /// Execute the audit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        session.db.verify_integrity()?;
        let violations = report::audit(session.db.connection())?;

        if global.json() {
            print_json(&violations)?;
        } else if violations.is_empty() {
            if !global.quiet {
                println!("All seats consistent");
            }
        } else {
            for violation in &violations {
                println!("{violation}");
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CliError::Corruption(format!(
                "{} seat(s) disagree with their reservations",
                violations.len()
            )))
        }
    }
}
