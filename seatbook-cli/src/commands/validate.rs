//! Command to validate a seatbook configuration file.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use seatbook::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a configuration file, or print the effective configuration.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate (default: the layered configuration)
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let Some(path) = self.config_path else {
            // Files, environment and defaults merged, exactly as other commands see them.
            let config = load_configuration(global)?;
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| CliError::Config(e.to_string()))?;
            print!("{yaml}");
            return Ok(());
        };

        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let config = ConfigLoader::load_file(&path).map_err(|e| CliError::Config(e.to_string()))?;
        ConfigValidator::validate(&config).map_err(|e| CliError::Config(e.to_string()))?;
        config
            .booking_rules()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if !global.quiet {
            println!("Configuration is valid");
        }
        Ok(())
    }
}
