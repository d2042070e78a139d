//! Property-based tests for identifier normalization.

use super::{normalize, validate_cui, verify};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        .. ProptestConfig::default()
    })]

    // Normalized output only ever contains ASCII digits.
    #[test]
    fn normalize_yields_digits(input in ".*") {
        prop_assert!(normalize(&input).bytes().all(|b| b.is_ascii_digit()));
    }

    // Normalization is idempotent.
    #[test]
    fn normalize_idempotent(input in ".*") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    // Inserting separators never changes the verdict.
    #[test]
    fn separators_do_not_matter(digits in "[0-9]{1,20}", sep in "[ ./-]") {
        let spaced: String = digits
            .chars()
            .flat_map(|c| [c.to_string(), sep.clone()])
            .collect();
        prop_assert!(verify(&spaced, &digits));
    }

    // Verification is symmetric.
    #[test]
    fn verify_symmetric(a in "[0-9 -]{0,15}", b in "[0-9 -]{0,15}") {
        prop_assert_eq!(verify(&a, &b), verify(&b, &a));
    }

    // Any identifier without 13 digits fails the structural check.
    #[test]
    fn wrong_length_rejected(digits in "[0-9]{0,12}") {
        prop_assert!(validate_cui(&digits).is_err());
    }
}
