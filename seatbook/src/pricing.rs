//! Pricing rules for bookings and seat changes.
//!
//! A booking's total is its base price minus the loyalty discount. Each seat
//! change adds a surcharge computed from the original base price, no matter
//! how many changes came before. Every step rounds half-up to the cent.

use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};
use crate::reservation::ValidationError;
use crate::user::User;

/// Discount granted to loyal or VIP users (10%).
pub const DEFAULT_DISCOUNT_BASIS_POINTS: u32 = 1_000;

/// Surcharge applied on each seat change (10% of the base price).
pub const DEFAULT_SURCHARGE_BASIS_POINTS: u32 = 1_000;

/// Number of bookings after which a user becomes VIP.
pub const DEFAULT_VIP_THRESHOLD: u32 = 5;

/// The price rules applied by the lifecycle operations.
///
/// # Examples
///
/// ```
/// use seatbook::{Money, PricingRules, User};
///
/// let rules = PricingRules::default();
/// let mut user = User::new("a@x.com", "Ana").unwrap();
/// let base = Money::from_cents(25_000);
///
/// let rate = rules.discount_rate(&user);
/// assert_eq!(rules.final_price(base, rate), base);
///
/// user.reservation_count = 5;
/// let rate = rules.discount_rate(&user);
/// assert_eq!(rules.final_price(base, rate).cents(), 22_500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Discount for VIP users.
    pub discount_rate: Rate,
    /// Surcharge per seat change.
    pub surcharge_rate: Rate,
    /// Booking count at which a user becomes VIP.
    pub vip_threshold: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            discount_rate: Rate::from_basis_points(DEFAULT_DISCOUNT_BASIS_POINTS)
                .unwrap_or(Rate::ZERO),
            surcharge_rate: Rate::from_basis_points(DEFAULT_SURCHARGE_BASIS_POINTS)
                .unwrap_or(Rate::ZERO),
            vip_threshold: DEFAULT_VIP_THRESHOLD,
        }
    }
}

impl PricingRules {
    /// Returns the discount the user is entitled to right now.
    #[must_use]
    pub fn discount_rate(&self, user: &User) -> Rate {
        if user.is_vip(self.vip_threshold) {
            self.discount_rate
        } else {
            Rate::ZERO
        }
    }

    /// `round2(base * (1 - rate))`.
    #[must_use]
    pub fn final_price(&self, base: Money, rate: Rate) -> Money {
        base.apply_rate(rate.complement())
    }

    /// `round2(base * surcharge_rate)`, always from the original base price.
    #[must_use]
    pub fn surcharge(&self, base: Money) -> Money {
        base.apply_rate(self.surcharge_rate)
    }

    /// `round2(old_total + surcharge)`.
    ///
    /// Both operands are already whole cents, so the sum is exact.
    ///
    /// # Errors
    ///
    /// Returns an error if the new total would exceed [`Money::MAX`].
    pub fn new_total(&self, old_total: Money, surcharge: Money) -> Result<Money, ValidationError> {
        old_total
            .checked_add(surcharge)
            .ok_or_else(|| ValidationError {
                field: "total_price".into(),
                message: format!(
                    "total {old_total} plus surcharge {surcharge} exceeds the maximum amount {}",
                    Money::MAX
                ),
            })
    }
}


#[cfg(test)]
mod proptests;
