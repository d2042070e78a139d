//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AuditCommand, BookCommand, CancelCommand, CompletionsCommand, ConfirmBatchCommand,
    ConfirmCommand, InitCommand, ListCommand, ModifyCommand, ReportCommand, SeatCommand,
    ShowCommand, UserCommand, ValidateCommand,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line front end for the seatbook booking store.
#[derive(Parser)]
#[command(name = "seatbook")]
#[command(version, about = "Book, move, cancel and confirm flight seats", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SEATBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SEATBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Output format
    #[arg(
        long,
        value_enum,
        global = true,
        default_value = "human",
        env = "SEATBOOK_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// How command results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for people
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register or list users
    #[command(subcommand)]
    User(UserCommand),

    /// Add or list seats
    #[command(subcommand)]
    Seat(SeatCommand),

    /// Book a free seat
    Book(BookCommand),

    /// Move a reservation to another seat of the same class
    Modify(ModifyCommand),

    /// Cancel a reservation and free its seat
    Cancel(CancelCommand),

    /// Confirm one reservation
    Confirm(ConfirmCommand),

    /// Confirm several reservations at once, or none of them
    ConfirmBatch(ConfirmBatchCommand),

    /// Show one reservation with its seat and history
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Summarize users, seats and reservations
    Report(ReportCommand),

    /// Check that seat occupancy agrees with live reservations
    Audit(AuditCommand),

    /// Validate a configuration file, or print the effective configuration
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
