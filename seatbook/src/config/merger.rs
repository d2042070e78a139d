//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, NotificationConfig, PricingConfig};

/// Merges configuration layers according to precedence.
///
/// # Examples
///
/// ```
/// use seatbook::config::{Config, ConfigMerger};
///
/// let low = Config { require_valid_identifier: Some(false), ..Default::default() };
/// let high = Config { require_valid_identifier: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.require_valid_identifier, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` into `target`; every field set in `source` wins.
    ///
    /// Nested sections merge field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.require_valid_identifier.is_some() {
            target.require_valid_identifier = source.require_valid_identifier;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if let Some(ref source_pricing) = source.pricing {
            target.pricing = Some(match &target.pricing {
                Some(target_pricing) => Self::merge_pricing(target_pricing, source_pricing),
                None => source_pricing.clone(),
            });
        }

        if let Some(ref source_notifications) = source.notifications {
            target.notifications = Some(match &target.notifications {
                Some(target_notifications) => {
                    Self::merge_notifications(target_notifications, source_notifications)
                }
                None => source_notifications.clone(),
            });
        }
    }

    fn merge_pricing(target: &PricingConfig, source: &PricingConfig) -> PricingConfig {
        PricingConfig {
            discount_rate: source.discount_rate.or(target.discount_rate),
            surcharge_rate: source.surcharge_rate.or(target.surcharge_rate),
            vip_threshold: source.vip_threshold.or(target.vip_threshold),
        }
    }

    fn merge_notifications(
        target: &NotificationConfig,
        source: &NotificationConfig,
    ) -> NotificationConfig {
        NotificationConfig {
            dedup_ttl_ms: source.dedup_ttl_ms.or(target.dedup_ttl_ms),
            sink: source.sink.or(target.sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NotificationSink;
    use std::path::PathBuf;

    #[test]
    fn test_nested_fields_merge_individually() {
        let mut target = Config {
            pricing: Some(PricingConfig {
                discount_rate: Some(0.2),
                vip_threshold: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let source = Config {
            pricing: Some(PricingConfig {
                vip_threshold: Some(7),
                ..Default::default()
            }),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        let pricing = target.pricing.unwrap();
        assert_eq!(pricing.discount_rate, Some(0.2));
        assert_eq!(pricing.vip_threshold, Some(7));
    }

    #[test]
    fn test_merge_sources_in_order() {
        let source = |precedence, sink| ConfigSource {
            path: PathBuf::from("config.yaml"),
            precedence,
            config: Config {
                notifications: Some(NotificationConfig {
                    sink: Some(sink),
                    ..Default::default()
                }),
                ..Default::default()
            },
        };

        let merged = ConfigMerger::merge(vec![
            source(1, NotificationSink::Outbox),
            source(2, NotificationSink::Log),
        ]);
        assert_eq!(merged.notification_sink(), NotificationSink::Log);
    }
}
