//! Database configuration and connection parameters.
//!
//! This module provides configuration types for database connections,
//! including path resolution and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for database connections.
///
/// This struct contains all parameters needed to open and configure
/// a database connection, including the database file path, timeout
/// settings, and access modes.
///
/// # Examples
///
/// ```
/// use seatbook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// // Create a configuration with default settings
/// let config = DatabaseConfig::new("/tmp/seatbook.db");
///
/// // Customize the configuration
/// let config = DatabaseConfig::new("/tmp/seatbook.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/seatbook.db");
    /// assert_eq!(config.path.to_str().unwrap(), "/tmp/seatbook.db");
    /// ```
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    ///
    /// The busy timeout determines how long the database connection will
    /// wait when encountering a locked database before returning an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::database::DatabaseConfig;
    /// use std::time::Duration;
    ///
    /// let config = DatabaseConfig::new("/tmp/seatbook.db")
    ///     .with_busy_timeout(Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/seatbook.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "SEATBOOK_DATA_DIR";

/// File name of the booking store inside the data directory.
pub const DATABASE_FILE_NAME: &str = "seatbook.db";

/// Returns the default data directory, `~/.seatbook`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use seatbook::database::default_data_dir;
///
/// let data_dir = default_data_dir().unwrap();
/// println!("Data directory: {}", data_dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".seatbook"))
}

/// Resolves the data directory.
///
/// The resolution order is:
/// 1. `explicit`, when given (the CLI's `--data-dir`)
/// 2. `$SEATBOOK_DATA_DIR` if set and non-empty
/// 3. `~/.seatbook`
///
/// # Errors
///
/// Returns an error if neither an explicit directory nor the environment
/// variable is given and the home directory cannot be determined.
///
/// # Examples
///
/// ```
/// use seatbook::database::resolve_data_dir;
/// use std::path::Path;
///
/// let dir = resolve_data_dir(Some(Path::new("/srv/booking"))).unwrap();
/// assert_eq!(dir, Path::new("/srv/booking"));
/// ```
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database path inside the resolved data directory.
///
/// # Errors
///
/// See [`resolve_data_dir`].
///
/// # Examples
///
/// ```no_run
/// use seatbook::database::resolve_database_path;
///
/// let db_path = resolve_database_path(None).unwrap();
/// println!("Database path: {}", db_path.display());
/// ```
pub fn resolve_database_path(data_dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_data_dir(data_dir)?.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_new() {
        let config = DatabaseConfig::new("/tmp/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.auto_create);
        assert!(!config.read_only);
    }

    #[test]
    fn test_config_with_busy_timeout() {
        let config = DatabaseConfig::new("/tmp/test.db")
            .with_busy_timeout(Duration::from_millis(10000));
        assert_eq!(config.busy_timeout, Duration::from_millis(10000));
    }

    #[test]
    fn test_config_read_only() {
        let config = DatabaseConfig::new("/tmp/test.db").read_only();
        assert!(config.read_only);
        assert!(!config.auto_create);
    }

    #[test]
    fn test_default_data_dir() {
        if let Some(home) = home::home_dir() {
            assert_eq!(default_data_dir().unwrap(), home.join(".seatbook"));
        }
    }

    #[test]
    #[serial]
    fn test_resolve_database_path() {
        std::env::remove_var(DATA_DIR_ENV);
        if home::home_dir().is_some() {
            let path = resolve_database_path(None).unwrap();
            assert!(path.ends_with(".seatbook/seatbook.db"));
        }

        std::env::set_var(DATA_DIR_ENV, "/custom/data");
        let path = resolve_database_path(None).unwrap();
        assert_eq!(path, PathBuf::from("/custom/data/seatbook.db"));

        // Explicit directory wins over the environment.
        let path = resolve_database_path(Some(Path::new("/explicit"))).unwrap();
        assert_eq!(path, PathBuf::from("/explicit/seatbook.db"));

        std::env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    #[serial]
    fn test_blank_env_falls_back_to_home() {
        std::env::set_var(DATA_DIR_ENV, "  ");
        if let Some(home) = home::home_dir() {
            assert_eq!(resolve_data_dir(None).unwrap(), home.join(".seatbook"));
        }
        std::env::remove_var(DATA_DIR_ENV);
    }
}
