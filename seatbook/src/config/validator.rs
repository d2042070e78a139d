//! Configuration validation.

use crate::config::schema::{Config, NotificationConfig, PricingConfig};
use crate::error::{Error, Result};

/// Upper bound for the dedup window lifetime (one hour).
const MAX_DEDUP_TTL_MS: u64 = 3_600_000;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use seatbook::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every set field.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref pricing) = config.pricing {
            Self::validate_pricing(pricing)?;
        }

        if let Some(ref notifications) = config.notifications {
            Self::validate_notifications(notifications)?;
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    fn validate_pricing(pricing: &PricingConfig) -> Result<()> {
        Self::validate_rate("pricing.discount_rate", pricing.discount_rate)?;
        Self::validate_rate("pricing.surcharge_rate", pricing.surcharge_rate)?;

        if pricing.vip_threshold == Some(0) {
            return Err(Error::Validation {
                field: "pricing.vip_threshold".into(),
                message: "threshold must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn validate_rate(field: &str, rate: Option<f64>) -> Result<()> {
        match rate {
            Some(r) if !(0.0..=1.0).contains(&r) => Err(Error::Validation {
                field: field.into(),
                message: format!("rate {r} must be between 0 and 1"),
            }),
            _ => Ok(()),
        }
    }

    fn validate_notifications(notifications: &NotificationConfig) -> Result<()> {
        if let Some(ttl) = notifications.dedup_ttl_ms {
            if ttl > MAX_DEDUP_TTL_MS {
                return Err(Error::Validation {
                    field: "notifications.dedup_ttl_ms".into(),
                    message: format!("{ttl} exceeds the maximum of {MAX_DEDUP_TTL_MS}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing(discount: Option<f64>, threshold: Option<u32>) -> Config {
        Config {
            pricing: Some(PricingConfig {
                discount_rate: discount,
                surcharge_rate: None,
                vip_threshold: threshold,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        ConfigValidator::validate(&pricing(Some(0.0), Some(1))).unwrap();
        ConfigValidator::validate(&pricing(Some(1.0), None)).unwrap();
    }

    #[test]
    fn test_rate_out_of_range() {
        for bad in [-0.1, 1.01, f64::NAN] {
            let err = ConfigValidator::validate(&pricing(Some(bad), None)).unwrap_err();
            assert!(
                matches!(err, Error::Validation { ref field, .. } if field == "pricing.discount_rate")
            );
        }
    }

    #[test]
    fn test_zero_threshold() {
        assert!(ConfigValidator::validate(&pricing(None, Some(0))).is_err());
    }

    #[test]
    fn test_zero_lock_wait() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_dedup_ttl_limit() {
        let config = Config {
            notifications: Some(NotificationConfig {
                dedup_ttl_ms: Some(MAX_DEDUP_TTL_MS + 1),
                sink: None,
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
