//! Main entry point for the seatbook CLI.
//!
//! This is the command-line interface for the seatbook booking store.
//! It provides commands for managing seats and reservations:
//! - `book`: Book a free seat
//! - `modify`: Move a reservation to another seat of the same class
//! - `cancel`: Cancel a reservation
//! - `confirm`, `confirm-batch`: Confirm reservations
//! - `list`, `show`, `report`, `audit`: Inspect the store

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors are invalid arguments.
            let code = if e.use_stderr() { 4 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let logger = seatbook::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        format: cli.format,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::User(cmd) => cmd.execute(&global),
        cli::Command::Seat(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Modify(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Confirm(cmd) => cmd.execute(&global),
        cli::Command::ConfirmBatch(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Report(cmd) => cmd.execute(&global),
        cli::Command::Audit(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
