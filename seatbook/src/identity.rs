//! Passenger identifier checks.
//!
//! Mutating a reservation requires the caller to present the passenger's
//! government identifier. Identifiers are compared on their digits only, so
//! `"1234 56789 0101"` and `"1234-56789-0101"` name the same passenger.

use crate::reservation::ValidationError;

/// Number of municipalities per department, indexed by department code - 1.
const MUNICIPALITIES_PER_DEPARTMENT: [u8; 22] = [
    17, 8, 16, 16, 14, 19, 8, 24, 21, 9, 30, 32, 21, 13, 19, 18, 14, 5, 11, 8, 17, 11,
];

/// Length of a personal identification code (CUI).
pub const CUI_LENGTH: usize = 13;

/// Strips every non-digit character.
///
/// # Examples
///
/// ```
/// use seatbook::identity::normalize;
///
/// assert_eq!(normalize("123-456 / 7"), "1234567");
/// assert_eq!(normalize("no digits"), "");
/// ```
#[must_use]
pub fn normalize(identifier: &str) -> String {
    identifier.chars().filter(char::is_ascii_digit).collect()
}

/// Returns whether `supplied` names the same passenger as `stored`.
///
/// # Examples
///
/// ```
/// use seatbook::identity::verify;
///
/// assert!(verify("123-456", "123456"));
/// assert!(!verify("123456", "654321"));
/// ```
#[must_use]
pub fn verify(supplied: &str, stored: &str) -> bool {
    normalize(supplied) == normalize(stored)
}

/// Checks the structure of a Guatemalan CUI.
///
/// The digits are taken after [`normalize`]. There must be exactly 13;
/// digits 10-11 are the department code (01..=22) and digits 12-13 the
/// municipality code, bounded by the department's municipality count. No
/// checksum is verified.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `identifier` describing the first
/// structural problem found.
///
/// # Examples
///
/// ```
/// use seatbook::identity::validate_cui;
///
/// assert!(validate_cui("1234 56789 0101").is_ok());
/// assert!(validate_cui("1234567892301").is_err()); // department 23
/// ```
pub fn validate_cui(identifier: &str) -> Result<(), ValidationError> {
    let digits = normalize(identifier);
    if digits.len() != CUI_LENGTH {
        return Err(invalid(format!(
            "expected {CUI_LENGTH} digits, found {}",
            digits.len()
        )));
    }

    let department: usize = digits[9..11]
        .parse()
        .map_err(|_| invalid("department code is not numeric".to_string()))?;
    let municipality: u8 = digits[11..13]
        .parse()
        .map_err(|_| invalid("municipality code is not numeric".to_string()))?;

    if !(1..=MUNICIPALITIES_PER_DEPARTMENT.len()).contains(&department) {
        return Err(invalid(format!(
            "department {department:02} is outside 01..{}",
            MUNICIPALITIES_PER_DEPARTMENT.len()
        )));
    }

    let max = MUNICIPALITIES_PER_DEPARTMENT[department - 1];
    if municipality < 1 || municipality > max {
        return Err(invalid(format!(
            "municipality {municipality:02} is outside 01..{max:02} for department {department:02}"
        )));
    }

    Ok(())
}

fn invalid(message: String) -> ValidationError {
    ValidationError {
        field: "identifier".into(),
        message,
    }
}


#[cfg(test)]
mod proptests;
