//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings, plus the transaction boundary every
//! lifecycle operation runs through.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// Each worker owns one `Database`. Connections are not shared between
/// threads; the store serializes writers across connections.
///
/// # Examples
///
/// ```no_run
/// use seatbook::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/seatbook.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Configure busy timeout
    /// - Set WAL mode for concurrent access
    /// - Enable foreign key enforcement
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatbook::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/seatbook.db");
    /// let db = Database::open(config).unwrap();
    /// ```
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        // Ensure parent directory exists if auto-creating
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Determine open flags based on configuration
        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        // Open the connection
        let conn = Connection::open_with_flags(&config.path, flags)?;

        // Busy timeout first so concurrent openers wait on the WAL switch
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;
        // Note: PRAGMA journal_mode returns a result, so we use query_row
        if !config.read_only {
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;

        super::migrations::check_schema_compatibility(&conn)?;

        log::debug!("opened booking store at {}", config.path.display());
        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    ///
    /// This provides access to the raw connection for advanced operations.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatbook::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/seatbook.db");
    /// let db = Database::open(config).unwrap();
    /// let conn = db.connection();
    /// ```
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    ///
    /// This provides mutable access to the raw connection for operations
    /// that require mutability, such as transactions.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatbook::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/seatbook.db");
    /// let mut db = Database::open(config).unwrap();
    /// let conn = db.connection_mut();
    /// ```
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Returns the configuration the database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Begins a write transaction.
    ///
    /// The transaction takes the store's write lock immediately
    /// (`BEGIN IMMEDIATE`), so every read made through it sees a state no
    /// other writer can change before commit. Dropping the transaction
    /// without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] if another writer holds the lock for
    /// longer than the busy timeout.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seatbook::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/seatbook.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// tx.commit().unwrap();
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }

    /// Verifies database integrity using PRAGMA `integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if `SQLite` reports a problem.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}
