//! Configuration system for seatbook.
//!
//! This module provides layered configuration with support for:
//! - a YAML configuration file (`config.yaml` in the data directory)
//! - `SEATBOOK_*` environment variable overrides
//! - programmatic overrides via the builder
//! - validation of the merged result
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SEATBOOK_*`)
//! 3. `<data-dir>/config.yaml`
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use seatbook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/var/lib/seatbook"))
//!     .build()
//!     .unwrap();
//!
//! let rules = config.booking_rules().unwrap();
//! println!("VIP after {} bookings", rules.pricing.vip_threshold);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{
    Config, NotificationConfig, NotificationSink, PricingConfig, CONFIG_FILE_NAME,
    DEFAULT_LOCK_WAIT_SECONDS,
};
pub use validator::ConfigValidator;
