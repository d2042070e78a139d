//! Property-based tests for the pricing rules.

use super::PricingRules;
use crate::money::{Money, Rate};
use crate::user::User;
use proptest::prelude::*;

fn base_strategy() -> impl Strategy<Value = Money> {
    (0i64..10_000_000).prop_map(Money::from_cents)
}

fn rate_strategy() -> impl Strategy<Value = Rate> {
    (0u32..=10_000).prop_map(|bp| Rate::from_basis_points(bp).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A discounted price never exceeds the base and never goes negative.
    #[test]
    fn final_price_within_bounds(base in base_strategy(), rate in rate_strategy()) {
        let rules = PricingRules::default();
        let price = rules.final_price(base, rate);
        prop_assert!(price <= base);
        prop_assert!(price >= Money::ZERO);
    }

    // Discount and final price add back up to the base within one cent.
    #[test]
    fn discount_and_price_sum_to_base(base in base_strategy(), rate in rate_strategy()) {
        let rules = PricingRules::default();
        let price = rules.final_price(base, rate);
        let discount = base.apply_rate(rate);
        let diff = (price + discount).cents() - base.cents();
        prop_assert!(diff.abs() <= 1);
    }

    // Repeated changes add the same surcharge each time.
    #[test]
    fn surcharge_is_flat(base in base_strategy(), changes in 0usize..10) {
        let rules = PricingRules::default();
        let mut total = base;
        for _ in 0..changes {
            total = rules.new_total(total, rules.surcharge(base)).unwrap();
        }
        let expected = base.cents() + rules.surcharge(base).cents() * i64::try_from(changes).unwrap();
        prop_assert_eq!(total.cents(), expected);
    }

    // Discount eligibility is monotone in the booking count.
    #[test]
    fn discount_monotone_in_count(count in 0u32..20) {
        let rules = PricingRules::default();
        let mut user = User::new("p@x.com", "Prop").unwrap();
        user.reservation_count = count;
        let before = rules.discount_rate(&user);
        user.reservation_count = count + 1;
        let after = rules.discount_rate(&user);
        prop_assert!(after >= before);
    }
}
