//! Configuration schema definitions.
//!
//! Every field is optional so that files, environment variables and
//! programmatic overrides can each set only what they care about. Unset
//! fields fall back to the built-in defaults when the configuration is
//! resolved into [`BookingRules`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::money::Rate;
use crate::operations::BookingRules;
use crate::pricing::PricingRules;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default maximum wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use seatbook::config::{Config, PricingConfig};
///
/// let config = Config {
///     pricing: Some(PricingConfig {
///         vip_threshold: Some(3),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.booking_rules().unwrap().pricing.vip_threshold, 3);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Discount and surcharge settings.
    pub pricing: Option<PricingConfig>,

    /// Notification delivery settings.
    pub notifications: Option<NotificationConfig>,

    /// Reject passenger identifiers that are not a structurally valid CUI.
    pub require_valid_identifier: Option<bool>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

/// Pricing settings. Rates are fractions between 0 and 1.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Loyalty discount for VIP users.
    pub discount_rate: Option<f64>,
    /// Surcharge per seat change, applied to the base price.
    pub surcharge_rate: Option<f64>,
    /// Bookings needed before a user becomes VIP.
    pub vip_threshold: Option<u32>,
}

/// Notification settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// How long a batch confirmation suppresses single confirmation notices.
    pub dedup_ttl_ms: Option<u64>,
    /// Where notifications go.
    pub sink: Option<NotificationSink>,
}

/// Destination for notifications sent by the CLI.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSink {
    /// Append JSON lines to `outbox.jsonl` in the data directory.
    #[default]
    Outbox,
    /// Write a line to the log.
    Log,
}

impl std::str::FromStr for NotificationSink {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "outbox" => Ok(Self::Outbox),
            "log" => Ok(Self::Log),
            other => Err(format!("unknown notification sink '{other}' (expected outbox or log)")),
        }
    }
}

impl Config {
    /// Resolves the configured rules, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a rate is outside 0..=1.
    pub fn booking_rules(&self) -> Result<BookingRules> {
        let defaults = BookingRules::default();
        let pricing = self.pricing.clone().unwrap_or_default();
        let notifications = self.notifications.clone().unwrap_or_default();

        let discount_rate = match pricing.discount_rate {
            Some(rate) => Rate::try_from_f64(rate)?,
            None => defaults.pricing.discount_rate,
        };
        let surcharge_rate = match pricing.surcharge_rate {
            Some(rate) => Rate::try_from_f64(rate)?,
            None => defaults.pricing.surcharge_rate,
        };

        Ok(BookingRules {
            pricing: PricingRules {
                discount_rate,
                surcharge_rate,
                vip_threshold: pricing
                    .vip_threshold
                    .unwrap_or(defaults.pricing.vip_threshold),
            },
            dedup_ttl: notifications
                .dedup_ttl_ms
                .map_or(defaults.dedup_ttl, Duration::from_millis),
            require_valid_identifier: self
                .require_valid_identifier
                .unwrap_or(defaults.require_valid_identifier),
        })
    }

    /// The configured notification destination.
    #[must_use]
    pub fn notification_sink(&self) -> NotificationSink {
        self.notifications
            .as_ref()
            .and_then(|n| n.sink)
            .unwrap_or_default()
    }

    /// The configured lock wait.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }
}
