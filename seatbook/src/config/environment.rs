//! Environment variable handling for configuration overrides.
//!
//! `SEATBOOK_*` variables override values from configuration files.

use crate::config::schema::{Config, NotificationSink};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Loyalty discount rate (fraction).
pub const DISCOUNT_RATE_ENV: &str = "SEATBOOK_DISCOUNT_RATE";
/// Seat-change surcharge rate (fraction).
pub const SURCHARGE_RATE_ENV: &str = "SEATBOOK_SURCHARGE_RATE";
/// Bookings needed to become VIP.
pub const VIP_THRESHOLD_ENV: &str = "SEATBOOK_VIP_THRESHOLD";
/// Dedup window lifetime in milliseconds.
pub const DEDUP_TTL_ENV: &str = "SEATBOOK_DEDUP_TTL_MS";
/// Notification destination (`outbox` or `log`).
pub const NOTIFICATION_SINK_ENV: &str = "SEATBOOK_NOTIFICATION_SINK";
/// Whether to validate passenger identifiers structurally.
pub const REQUIRE_VALID_IDENTIFIER_ENV: &str = "SEATBOOK_REQUIRE_VALID_IDENTIFIER";
/// Maximum wait for the write lock in seconds.
pub const LOCK_WAIT_ENV: &str = "SEATBOOK_MAXIMUM_LOCK_WAIT_SECONDS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use seatbook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every set `SEATBOOK_*` variable to `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable if its value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(rate) = Self::parsed::<f64>(DISCOUNT_RATE_ENV, "a number between 0 and 1")? {
            config.pricing.get_or_insert_with(Default::default).discount_rate = Some(rate);
        }

        if let Some(rate) = Self::parsed::<f64>(SURCHARGE_RATE_ENV, "a number between 0 and 1")? {
            config.pricing.get_or_insert_with(Default::default).surcharge_rate = Some(rate);
        }

        if let Some(threshold) = Self::parsed::<u32>(VIP_THRESHOLD_ENV, "a positive integer")? {
            config.pricing.get_or_insert_with(Default::default).vip_threshold = Some(threshold);
        }

        if let Some(ttl) = Self::parsed::<u64>(DEDUP_TTL_ENV, "a duration in milliseconds")? {
            config
                .notifications
                .get_or_insert_with(Default::default)
                .dedup_ttl_ms = Some(ttl);
        }

        if let Ok(value) = env::var(NOTIFICATION_SINK_ENV) {
            let sink = NotificationSink::from_str(&value).map_err(|message| Error::Validation {
                field: NOTIFICATION_SINK_ENV.into(),
                message,
            })?;
            config.notifications.get_or_insert_with(Default::default).sink = Some(sink);
        }

        if let Ok(value) = env::var(REQUIRE_VALID_IDENTIFIER_ENV) {
            config.require_valid_identifier =
                Some(Self::parse_bool(REQUIRE_VALID_IDENTIFIER_ENV, &value)?);
        }

        if let Some(seconds) = Self::parsed::<u64>(LOCK_WAIT_ENV, "a positive integer")? {
            config.maximum_lock_wait_seconds = Some(seconds);
        }

        Ok(())
    }

    fn parsed<T: FromStr>(name: &str, expected: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(value) => value.trim().parse().map(Some).map_err(|_| Error::Validation {
                field: name.into(),
                message: format!("invalid value '{value}': must be {expected}"),
            }),
            Err(_) => Ok(None),
        }
    }

    /// Parses a boolean value.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL: [&str; 7] = [
        DISCOUNT_RATE_ENV,
        SURCHARGE_RATE_ENV,
        VIP_THRESHOLD_ENV,
        DEDUP_TTL_ENV,
        NOTIFICATION_SINK_ENV,
        REQUIRE_VALID_IDENTIFIER_ENV,
        LOCK_WAIT_ENV,
    ];

    fn with_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        for name in ALL {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
        f();
        for name in ALL {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_no_vars_no_changes() {
        with_vars(&[], || {
            let mut config = Config::default();
            EnvironmentConfig::apply_overrides(&mut config).unwrap();
            assert_eq!(config, Config::default());
        });
    }

    #[test]
    #[serial]
    fn test_all_overrides_applied() {
        with_vars(
            &[
                (DISCOUNT_RATE_ENV, "0.2"),
                (SURCHARGE_RATE_ENV, "0.05"),
                (VIP_THRESHOLD_ENV, "3"),
                (DEDUP_TTL_ENV, "500"),
                (NOTIFICATION_SINK_ENV, "log"),
                (REQUIRE_VALID_IDENTIFIER_ENV, "yes"),
                (LOCK_WAIT_ENV, "9"),
            ],
            || {
                let mut config = Config::default();
                EnvironmentConfig::apply_overrides(&mut config).unwrap();

                let pricing = config.pricing.clone().unwrap();
                assert_eq!(pricing.discount_rate, Some(0.2));
                assert_eq!(pricing.surcharge_rate, Some(0.05));
                assert_eq!(pricing.vip_threshold, Some(3));
                assert_eq!(config.notifications.clone().unwrap().dedup_ttl_ms, Some(500));
                assert_eq!(config.notification_sink(), NotificationSink::Log);
                assert_eq!(config.require_valid_identifier, Some(true));
                assert_eq!(config.maximum_lock_wait_seconds, Some(9));
            },
        );
    }

    #[test]
    #[serial]
    fn test_invalid_value_names_variable() {
        with_vars(&[(VIP_THRESHOLD_ENV, "many")], || {
            let err = EnvironmentConfig::apply_overrides(&mut Config::default()).unwrap_err();
            assert!(matches!(err, Error::Validation { ref field, .. } if field == VIP_THRESHOLD_ENV));
        });

        with_vars(&[(REQUIRE_VALID_IDENTIFIER_ENV, "maybe")], || {
            assert!(EnvironmentConfig::apply_overrides(&mut Config::default()).is_err());
        });
    }
}
