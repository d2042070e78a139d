//! Seat commands: add and list.

use crate::error::CliError;
use crate::utils::{print_json, GlobalOptions, Session};
use clap::{Args, Subcommand};
use seatbook::{CabinClass, Database, LifecycleManager, Seat, SeatId};

/// Add or list seats.
#[derive(Subcommand)]
pub enum SeatCommand {
    /// Add a free seat to the inventory
    Add(AddSeatCommand),

    /// List seats
    List(ListSeatsCommand),
}

/// Add a free seat to the inventory.
#[derive(Args)]
pub struct AddSeatCommand {
    /// Seat identifier
    #[arg(value_name = "SEAT")]
    pub id: SeatId,

    /// Cabin class (business or economy)
    #[arg(long, value_name = "CLASS")]
    pub class: CabinClass,

    /// Number shown to passengers (default: the identifier)
    #[arg(long, value_name = "NUMBER")]
    pub number: Option<String>,
}

/// List seats.
#[derive(Args)]
pub struct ListSeatsCommand {
    /// Only seats of this cabin class
    #[arg(long, value_name = "CLASS")]
    pub class: Option<CabinClass>,

    /// Only seats that can be booked
    #[arg(long)]
    pub free: bool,
}

impl SeatCommand {
    /// Execute the seat command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            SeatCommand::Add(cmd) => cmd.execute(global),
            SeatCommand::List(cmd) => cmd.execute(global),
        }
    }
}

impl AddSeatCommand {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let number = self.number.unwrap_or_else(|| self.id.to_string());
        let seat = Seat::new(self.id, number, self.class);

        let mut session = Session::open(global)?;
        let seat = LifecycleManager::new(&mut session.db, &session.ctx).add_seat(seat)?;

        if global.json() {
            print_json(&seat)
        } else {
            if !global.quiet {
                println!("Added {} seat {}", seat.class, seat.number);
            }
            Ok(())
        }
    }
}

impl ListSeatsCommand {
    fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let session = Session::open(global)?;
        let mut seats = Database::list_seats(session.db.connection(), self.class)?;
        if self.free {
            seats.retain(Seat::is_free);
        }

        if global.json() {
            return print_json(&seats);
        }

        println!("SEAT\tNUMBER\tCLASS\tSTATE");
        for seat in &seats {
            println!("{}\t{}\t{}\t{}", seat.id, seat.number, seat.class, seat.state);
        }
        Ok(())
    }
}
