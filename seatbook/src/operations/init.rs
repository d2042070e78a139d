//! Data directory initialization.
//!
//! Creates the data directory and an empty database, and optionally writes a
//! commented configuration file listing every setting with its default.

use std::fs;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// Options for initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a default configuration file.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options for `data_dir` with both flags off.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to replace an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a default configuration file.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What initialization did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// The data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# seatbook configuration
# Environment variables (SEATBOOK_*) override these values.

# pricing:
#   discount_rate: 0.10      # loyalty discount for VIP users
#   surcharge_rate: 0.10     # charged on the base price per seat change
#   vip_threshold: 5         # bookings needed to become VIP

# notifications:
#   dedup_ttl_ms: 10000      # batch confirmations suppress single notices this long
#   sink: outbox             # outbox (outbox.jsonl in the data dir) or log

# Reject passenger identifiers that are not a structurally valid CUI
# require_valid_identifier: false

# Maximum time to wait for the database write lock
# maximum_lock_wait_seconds: 5
";

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns an error if the database already exists and `overwrite` is not
/// set, or if a directory or file cannot be created.
///
/// # Examples
///
/// ```no_run
/// use seatbook::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/seatbook")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "database already exists at {}; use --overwrite to replace it",
                    db_path.display()
                ),
            });
        }
        fs::remove_file(&db_path)?;
        // A stale write-ahead log would be replayed into the new database.
        for suffix in ["-wal", "-shm"] {
            let sidecar = options.data_dir.join(format!("{DATABASE_FILE_NAME}{suffix}"));
            if sidecar.exists() {
                fs::remove_file(&sidecar)?;
            }
        }
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    log::debug!("initialized database at {}", db_path.display());

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
