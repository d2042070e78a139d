//! List command implementation.
//!
//! This module implements the `list` command, which displays reservations
//! as a table, JSON or CSV.

use crate::error::CliError;
use crate::utils::{format_timestamp, print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::database::ReservationFilter;
use seatbook::{Database, Reservation, ReservationState};
use std::io::Write;

/// Column headers for table and CSV output.
const COLUMN_HEADERS: [&str; 8] = [
    "id",
    "state",
    "user",
    "seat",
    "passenger",
    "base_price",
    "total_price",
    "created_at",
];

/// List reservations.
#[derive(Args)]
pub struct ListCommand {
    /// Only reservations of this user
    #[arg(long, value_name = "EMAIL")]
    pub user: Option<String>,

    /// Only reservations in this state (active, confirmed, cancelled)
    #[arg(long, value_name = "STATE")]
    pub state: Option<ReservationState>,

    /// Print CSV (takes precedence over --format)
    #[arg(long)]
    pub csv: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let filter = ReservationFilter::default()
            .with_user(self.user)
            .with_state(self.state);
        let reservations = Database::list_reservations(session.db.connection(), &filter)?;

        if self.csv {
            format_as_csv(&reservations)
        } else if global.json() {
            print_json(&reservations)
        } else {
            format_as_table(&reservations)
        }
    }
}

fn row(r: &Reservation) -> [String; 8] {
    [
        r.id.to_string(),
        r.state.to_string(),
        r.user_email.clone(),
        r.seat_id.to_string(),
        r.passenger.name.clone(),
        r.base_price.to_string(),
        r.total_price.to_string(),
        format_timestamp(r.created_at),
    ]
}

/// Format reservations as a human-readable table.
fn format_as_table(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for r in reservations {
        writeln!(handle, "{}", row(r).join("\t"))?;
    }

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Format reservations as CSV.
fn format_as_csv(reservations: &[Reservation]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;
    for r in reservations {
        writer.write_record(row(r)).map_err(csv_error)?;
    }
    writer.flush()?;

    Ok(())
}
