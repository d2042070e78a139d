//! Registered users and their loyalty state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// A registered user, keyed by email.
///
/// The booking counter only ever grows. A user is VIP when the flag is set
/// explicitly or when the counter reaches the configured threshold.
///
/// # Examples
///
/// ```
/// use seatbook::User;
///
/// let mut user = User::new(" a@x.com ", "Ana").unwrap();
/// assert_eq!(user.email, "a@x.com");
/// assert!(!user.is_vip(5));
///
/// user.reservation_count = 5;
/// assert!(user.is_vip(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique email address.
    pub email: String,
    /// Name used when addressing the user.
    pub full_name: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Explicit VIP flag.
    pub vip: bool,
    /// Number of successful bookings.
    pub reservation_count: u32,
}

impl User {
    /// Creates a new user with no bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the email has no `@` or the name is blank.
    pub fn new(email: impl AsRef<str>, full_name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let email = normalize_email(email.as_ref())?;
        let full_name = full_name.as_ref().trim();
        if full_name.is_empty() {
            return Err(ValidationError {
                field: "full_name".into(),
                message: "name must be non-empty".into(),
            });
        }

        Ok(Self {
            email,
            full_name: full_name.to_string(),
            created_at: Utc::now(),
            vip: false,
            reservation_count: 0,
        })
    }

    /// Whether the user currently qualifies for the loyalty discount.
    #[must_use]
    pub fn is_vip(&self, threshold: u32) -> bool {
        self.vip || self.reservation_count >= threshold
    }
}

/// Trims an email address and checks it looks like one.
///
/// # Errors
///
/// Returns an error if the address is empty or has no `@` between a local
/// part and a domain.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(trimmed.to_string())
        }
        _ => Err(ValidationError {
            field: "email".into(),
            message: format!("'{trimmed}' is not a valid email address"),
        }),
    }
}
