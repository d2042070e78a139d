//! Seat types for the seat registry.
//!
//! A seat has a stable identifier, a display number shown to passengers, a
//! cabin class and an occupancy state. Seats are provisioned once and never
//! deleted; only lifecycle transactions change their occupancy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// Identifier of a seat in the registry.
///
/// Identifiers are trimmed and must be non-empty.
///
/// # Examples
///
/// ```
/// use seatbook::SeatId;
///
/// let id = SeatId::new(" A1 ").unwrap();
/// assert_eq!(id.as_str(), "A1");
/// assert!(SeatId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Creates a seat identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "seat_id".into(),
                message: "seat identifier must be non-empty".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SeatId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Cabin class partition of the seat inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    /// Business cabin.
    Business,
    /// Economy cabin.
    Economy,
}

impl CabinClass {
    /// All cabin classes, in display order.
    pub const ALL: [Self; 2] = [Self::Business, Self::Economy];

    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Economy => "economy",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "business" => Ok(Self::Business),
            "economy" => Ok(Self::Economy),
            other => Err(ValidationError {
                field: "class".into(),
                message: format!("unknown cabin class '{other}' (expected business or economy)"),
            }),
        }
    }
}

/// Occupancy state of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    /// No live reservation references the seat.
    Free,
    /// Exactly one live reservation references the seat.
    Occupied,
}

impl SeatState {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Occupied => "occupied",
        }
    }
}

impl fmt::Display for SeatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeatState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "occupied" => Ok(Self::Occupied),
            other => Err(ValidationError {
                field: "state".into(),
                message: format!("unknown seat state '{other}'"),
            }),
        }
    }
}

/// A seat in the registry.
///
/// # Examples
///
/// ```
/// use seatbook::{CabinClass, Seat, SeatId, SeatState};
///
/// let seat = Seat::new(SeatId::new("A1").unwrap(), "A1", CabinClass::Economy);
/// assert_eq!(seat.state, SeatState::Free);
/// assert!(seat.is_free());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Registry identifier.
    pub id: SeatId,
    /// Number shown to passengers, e.g. `12C`.
    pub number: String,
    /// Cabin class.
    pub class: CabinClass,
    /// Occupancy state.
    pub state: SeatState,
}

impl Seat {
    /// Creates a Free seat.
    #[must_use]
    pub fn new(id: SeatId, number: impl Into<String>, class: CabinClass) -> Self {
        Self {
            id,
            number: number.into(),
            class,
            state: SeatState::Free,
        }
    }

    /// Whether the seat can be booked.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.state == SeatState::Free
    }
}

/// A seat whose stored state disagrees with its live reservations.
///
/// A Free seat must have no live reservation and an Occupied seat exactly
/// one. Violations are reported, never repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyViolation {
    /// The inconsistent seat.
    pub seat_id: SeatId,
    /// Stored occupancy state.
    pub state: SeatState,
    /// Number of non-cancelled reservations referencing the seat.
    pub live_reservations: u32,
}

impl fmt::Display for OccupancyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seat {} is {} but has {} live reservation(s)",
            self.seat_id, self.state, self.live_reservations
        )
    }
}
