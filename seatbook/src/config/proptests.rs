//! Property-based tests for configuration merging and resolution.

use super::merger::ConfigMerger;
use super::schema::{Config, NotificationConfig, NotificationSink, PricingConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn rate_strategy() -> impl Strategy<Value = f64> {
    (0u32..=10_000).prop_map(|bp| f64::from(bp) / 10_000.0)
}

fn pricing_strategy() -> impl Strategy<Value = PricingConfig> {
    (
        prop::option::of(rate_strategy()),
        prop::option::of(rate_strategy()),
        prop::option::of(1u32..100),
    )
        .prop_map(|(discount_rate, surcharge_rate, vip_threshold)| PricingConfig {
            discount_rate,
            surcharge_rate,
            vip_threshold,
        })
}

fn notifications_strategy() -> impl Strategy<Value = NotificationConfig> {
    (
        prop::option::of(0u64..=3_600_000),
        prop::option::of(prop_oneof![
            Just(NotificationSink::Outbox),
            Just(NotificationSink::Log)
        ]),
    )
        .prop_map(|(dedup_ttl_ms, sink)| NotificationConfig { dedup_ttl_ms, sink })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(pricing_strategy()),
        prop::option::of(notifications_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..600),
    )
        .prop_map(
            |(pricing, notifications, require_valid_identifier, maximum_lock_wait_seconds)| {
                Config {
                    pricing,
                    notifications,
                    require_valid_identifier,
                    maximum_lock_wait_seconds,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Merging an empty layer changes nothing.
    #[test]
    fn merge_default_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Every field set in the higher layer wins.
    #[test]
    fn merge_higher_layer_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        if high.require_valid_identifier.is_some() {
            prop_assert_eq!(result.require_valid_identifier, high.require_valid_identifier);
        } else {
            prop_assert_eq!(result.require_valid_identifier, low.require_valid_identifier);
        }

        if let Some(threshold) = high.pricing.as_ref().and_then(|p| p.vip_threshold) {
            prop_assert_eq!(result.pricing.as_ref().and_then(|p| p.vip_threshold), Some(threshold));
        }
        if let Some(sink) = high.notifications.as_ref().and_then(|n| n.sink) {
            prop_assert_eq!(result.notification_sink(), sink);
        }
    }

    // Any configuration that validates also resolves into rules.
    #[test]
    fn valid_config_resolves(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
        let rules = config.booking_rules().unwrap();
        if let Some(threshold) = config.pricing.as_ref().and_then(|p| p.vip_threshold) {
            prop_assert_eq!(rules.pricing.vip_threshold, threshold);
        }
    }
}
