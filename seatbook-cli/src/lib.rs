//! Library exports for seatbook-cli.
//!
//! This module exports the CLI structure for use by the build script
//! and by completion generation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
