//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the seatbook data directory and database.

use crate::error::CliError;
use crate::utils::{data_dir, print_json, shorten_path, GlobalOptions};
use clap::Parser;
use seatbook::config::CONFIG_FILE_NAME;
use seatbook::database::DATABASE_FILE_NAME;
use seatbook::operations::{init_database, InitOptions};

/// Initialize seatbook data directory and database.
#[derive(Parser)]
pub struct InitCommand {
    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = data_dir(global)?;
        let shown = shorten_path(&data_dir);

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize seatbook in: {shown}");

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            if data_dir.join(DATABASE_FILE_NAME).exists() {
                if self.overwrite {
                    println!("  - Replace existing database");
                } else {
                    println!("  - ERROR: Database already exists (use --overwrite to replace)");
                }
            } else {
                println!("  - Create database");
            }

            if self.with_config {
                if data_dir.join(CONFIG_FILE_NAME).exists() {
                    println!("  - Configuration file already exists (will not overwrite)");
                } else {
                    println!("  - Create configuration file");
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        if global.json() {
            return print_json(&serde_json::json!({
                "data_dir": result.data_dir,
                "data_dir_created": result.data_dir_created,
                "database_created": result.database_created,
                "config_created": result.config_created,
            }));
        }

        if global.quiet {
            return Ok(());
        }

        println!("Initialized seatbook in: {}", shorten_path(&result.data_dir));
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
