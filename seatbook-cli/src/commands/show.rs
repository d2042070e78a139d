//! Show command implementation.

use crate::error::CliError;
use crate::utils::{format_timestamp, print_json, GlobalOptions, Session};
use clap::Args;
use seatbook::{LifecycleManager, ReservationId};

/// Show one reservation with its seat and history.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation to show
    #[arg(value_name = "RESERVATION")]
    pub reservation: ReservationId,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut session = Session::open(global)?;
        let snapshot = LifecycleManager::new(&mut session.db, &session.ctx).lookup(self.reservation)?;

        if global.json() {
            return print_json(&snapshot);
        }

        let r = &snapshot.reservation;
        println!("Reservation {}", r.id);
        println!("  State:     {}", r.state);
        println!("  User:      {}", r.user_email);
        println!(
            "  Seat:      {} ({}, {})",
            snapshot.seat.number, snapshot.seat.class, r.selection
        );
        println!(
            "  Passenger: {}{}",
            r.passenger.name,
            if r.passenger.has_baggage { ", with baggage" } else { "" }
        );
        println!("  Base:      {}", r.base_price);
        println!("  Total:     {}", r.total_price);
        println!("  Booked:    {}", format_timestamp(r.created_at));

        if !r.modifications.is_empty() {
            println!("  Changes:");
            for m in &r.modifications {
                println!(
                    "    {}  +{}  {}",
                    format_timestamp(m.created_at),
                    m.surcharge,
                    m.description
                );
            }
        }
        Ok(())
    }
}
