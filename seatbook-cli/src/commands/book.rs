//! Book command implementation.
//!
//! This module implements the `book` command, which books a free seat for a
//! registered user.

use crate::error::CliError;
use crate::utils::{print_dry_run, print_json, GlobalOptions, Session};
use clap::{Args, ValueEnum};
use seatbook::operations::CreatePlan;
use seatbook::{LifecycleManager, Money, NewReservation, Passenger, SeatId, SelectionMethod};

/// Book a free seat.
#[derive(Args)]
pub struct BookCommand {
    /// Seat to book
    #[arg(value_name = "SEAT")]
    pub seat: SeatId,

    /// Booking user's email
    #[arg(long, value_name = "EMAIL", env = "SEATBOOK_USER")]
    pub user: String,

    /// Passenger name
    #[arg(long, value_name = "NAME")]
    pub passenger: String,

    /// Passenger government identifier
    #[arg(long, value_name = "ID")]
    pub identifier: String,

    /// Base price before discount, e.g. 250.00
    #[arg(long, value_name = "AMOUNT")]
    pub price: Money,

    /// The passenger checks baggage
    #[arg(long)]
    pub baggage: bool,

    /// How the seat was chosen
    #[arg(long, value_enum, default_value = "manual")]
    pub selection: Selection,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

/// Seat selection method.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Selection {
    /// Picked by the passenger
    Manual,
    /// Assigned at random
    Random,
}

impl From<Selection> for SelectionMethod {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Manual => SelectionMethod::Manual,
            Selection::Random => SelectionMethod::Random,
        }
    }
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let passenger = Passenger::new(&self.passenger, &self.identifier, self.baggage)?;
        let request = NewReservation::builder(self.seat, &self.user, passenger, self.price)
            .selection(self.selection.into())
            .build()?;

        let mut session = Session::open(global)?;
        let mut manager = LifecycleManager::new(&mut session.db, &session.ctx);

        if self.dry_run {
            let rules = *session.ctx.rules();
            let planner = CreatePlan::new(request, &rules.pricing)
                .with_identifier_validation(rules.require_valid_identifier);
            let result = manager.preview(&planner)?;
            return print_dry_run(&result, global);
        }

        let reservation = manager.create(request)?;

        if global.json() {
            return print_json(&reservation);
        }

        // The id alone on stdout keeps the command scriptable.
        println!("{}", reservation.id);
        if !global.quiet {
            eprintln!(
                "Booked seat {} for {}: total {}",
                reservation.seat_id, reservation.user_email, reservation.total_price
            );
        }
        Ok(())
    }
}
