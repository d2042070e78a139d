//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, database and
//! booking context setup, and output formatting.

use crate::cli::OutputFormat;
use crate::error::CliError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use seatbook::config::NotificationSink;
use seatbook::database::resolve_data_dir;
use seatbook::notify::{JsonlNotifier, LogNotifier, Notifier};
use seatbook::{BookingContext, Config, ConfigBuilder, Database, DatabaseConfig, ExecutionResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database lock wait (in seconds).
    pub busy_timeout: Option<u32>,

    /// How results are printed.
    pub format: OutputFormat,
}

impl GlobalOptions {
    /// Whether results should be printed as JSON.
    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Resolve the data directory: `--data-dir`, then `SEATBOOK_DATA_DIR`, then `~/.seatbook`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    resolve_data_dir(global.data_dir.as_deref()).map_err(|e| CliError::Config(e.to_string()))
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_data_dir(data_dir(global)?)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with the configured lock wait.
///
/// `--busy-timeout` wins over `maximum_lock_wait_seconds` from the
/// configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(seatbook::database::DATABASE_FILE_NAME);

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |secs| Duration::from_secs(secs.into()));
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout);

    Database::open(db_config).map_err(CliError::from)
}

/// Build the booking context, delivering notifications to the configured sink.
pub fn booking_context(global: &GlobalOptions, config: &Config) -> Result<BookingContext, CliError> {
    let rules = config
        .booking_rules()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let notifier: Arc<dyn Notifier> = match config.notification_sink() {
        NotificationSink::Outbox => Arc::new(JsonlNotifier::in_data_dir(&data_dir(global)?)),
        NotificationSink::Log => Arc::new(LogNotifier),
    };

    Ok(BookingContext::new(rules, notifier))
}

/// Everything a booking command needs.
pub struct Session {
    /// Open store.
    pub db: Database,
    /// Rules, dedup window and outbox.
    pub ctx: BookingContext,
}

impl Session {
    /// Load configuration, open the database and build the context.
    pub fn open(global: &GlobalOptions) -> Result<Self, CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let ctx = booking_context(global, &config)?;
        Ok(Self { db, ctx })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Pending notifications must reach the sink before the process exits.
        self.ctx.flush();
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

/// Describe what a dry run would have done.
pub fn print_dry_run(result: &ExecutionResult, global: &GlobalOptions) -> Result<(), CliError> {
    if global.json() {
        return print_json(&serde_json::json!({
            "dry_run": true,
            "actions": result.actions_taken,
            "warnings": result.warnings,
        }));
    }

    if !global.quiet {
        println!("Dry run - would perform the following actions:");
        for (i, action) in result.actions_taken.iter().enumerate() {
            println!("  {}. {action}", i + 1);
        }
        if !result.warnings.is_empty() {
            println!("Warnings:");
            for warning in &result.warnings {
                println!("  - {warning}");
            }
        }
    }
    Ok(())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.timestamp_opt(1_705_314_645, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_shorten_path_outside_home() {
        let path = PathBuf::from("/usr/local/bin");
        assert_eq!(shorten_path(&path), "/usr/local/bin");
    }

    #[test]
    fn test_busy_timeout_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalOptions {
            verbose: false,
            quiet: true,
            data_dir: Some(dir.path().to_path_buf()),
            busy_timeout: Some(1),
            format: OutputFormat::Human,
        };
        let db = open_database(&global, &Config::default()).unwrap();
        assert_eq!(db.config().busy_timeout, Duration::from_secs(1));
    }
}
