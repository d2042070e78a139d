//! Reservation types for seat bookings.
//!
//! This module provides the reservation record, its lifecycle state, the
//! passenger it was booked for, its append-only modification history and a
//! builder for new booking requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::seat::SeatId;

/// Numeric identifier assigned by the store when a reservation is created.
///
/// # Examples
///
/// ```
/// use seatbook::ReservationId;
///
/// let id: ReservationId = "42".parse().unwrap();
/// assert_eq!(id, ReservationId::new(42));
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| ValidationError {
                field: "reservation_id".into(),
                message: format!("'{s}' is not a valid reservation id"),
            })
    }
}

/// Lifecycle state of a reservation.
///
/// `Active` is initial. `Confirmed` is reachable from `Active` only.
/// `Cancelled` is reachable from both and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationState {
    /// Booked, not yet confirmed.
    Active,
    /// Confirmed by the user.
    Confirmed,
    /// Cancelled; the seat has been released.
    Cancelled,
}

impl ReservationState {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the reservation still holds its seat.
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for ReservationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError {
                field: "state".into(),
                message: format!("unknown reservation state '{other}'"),
            }),
        }
    }
}

/// How the seat was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Picked by the user.
    #[default]
    Manual,
    /// Assigned at random.
    Random,
}

impl SelectionMethod {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "random" => Ok(Self::Random),
            other => Err(ValidationError {
                field: "selection".into(),
                message: format!("unknown selection method '{other}' (expected manual or random)"),
            }),
        }
    }
}

/// The person travelling on a reservation.
///
/// # Examples
///
/// ```
/// use seatbook::Passenger;
///
/// let passenger = Passenger::new("Ana Lopez", "1234 56789 0101", true).unwrap();
/// assert!(passenger.has_baggage);
/// assert!(Passenger::new("Ana", "no digits", false).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Passenger name.
    pub name: String,
    /// Government identifier as entered.
    pub identifier: String,
    /// Whether the passenger checks baggage.
    pub has_baggage: bool,
}

impl Passenger {
    /// Creates a passenger record.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the identifier contains no
    /// digits, since identity checks compare digits only.
    pub fn new(
        name: impl AsRef<str>,
        identifier: impl AsRef<str>,
        has_baggage: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError {
                field: "passenger_name".into(),
                message: "passenger name must be non-empty".into(),
            });
        }

        let identifier = identifier.as_ref().trim();
        if !identifier.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError {
                field: "identifier".into(),
                message: "passenger identifier must contain digits".into(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            identifier: identifier.to_string(),
            has_baggage,
        })
    }
}

/// A recorded seat change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// The reservation that was changed.
    pub reservation_id: ReservationId,
    /// When the change was made.
    pub created_at: DateTime<Utc>,
    /// Amount added to the total.
    pub surcharge: Money,
    /// Free-text description.
    pub description: String,
}

/// A seat reservation with its modification history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned identifier.
    pub id: ReservationId,
    /// Lifecycle state.
    pub state: ReservationState,
    /// Owning user.
    pub user_email: String,
    /// Currently held seat.
    pub seat_id: SeatId,
    /// The traveller.
    pub passenger: Passenger,
    /// How the seat was chosen.
    pub selection: SelectionMethod,
    /// Price before discount.
    pub base_price: Money,
    /// Current total, including surcharges.
    pub total_price: Money,
    /// Booking time.
    pub created_at: DateTime<Utc>,
    /// Seat changes, oldest first.
    pub modifications: Vec<Modification>,
}

impl Reservation {
    /// Sum of all surcharges applied so far.
    #[must_use]
    pub fn surcharges(&self) -> Money {
        self.modifications.iter().map(|m| m.surcharge).sum()
    }

    /// Whether the reservation has been cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.state, ReservationState::Cancelled)
    }
}

/// A validated request to book a seat.
///
/// # Examples
///
/// ```
/// use seatbook::{Money, NewReservation, Passenger, SeatId, SelectionMethod};
///
/// let request = NewReservation::builder(
///     SeatId::new("A1").unwrap(),
///     "a@x.com",
///     Passenger::new("Ana", "1234567890101", false).unwrap(),
///     Money::from_cents(25_000),
/// )
/// .selection(SelectionMethod::Random)
/// .build()
/// .unwrap();
///
/// assert_eq!(request.selection, SelectionMethod::Random);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    /// Seat to book.
    pub seat_id: SeatId,
    /// Booking user.
    pub user_email: String,
    /// The traveller.
    pub passenger: Passenger,
    /// Price before discount.
    pub base_price: Money,
    /// How the seat was chosen.
    pub selection: SelectionMethod,
}

impl NewReservation {
    /// Starts building a booking request.
    #[must_use]
    pub fn builder(
        seat_id: SeatId,
        user_email: impl Into<String>,
        passenger: Passenger,
        base_price: Money,
    ) -> NewReservationBuilder {
        NewReservationBuilder {
            seat_id,
            user_email: user_email.into(),
            passenger,
            base_price,
            selection: SelectionMethod::default(),
        }
    }
}

/// Builder for [`NewReservation`].
#[derive(Debug)]
pub struct NewReservationBuilder {
    seat_id: SeatId,
    user_email: String,
    passenger: Passenger,
    base_price: Money,
    selection: SelectionMethod,
}

impl NewReservationBuilder {
    /// Sets the selection method.
    #[must_use]
    pub const fn selection(mut self, selection: SelectionMethod) -> Self {
        self.selection = selection;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the base price is negative or above
    /// [`Money::MAX`], or the email is malformed.
    pub fn build(self) -> Result<NewReservation, ValidationError> {
        if self.base_price.is_negative() {
            return Err(ValidationError {
                field: "base_price".into(),
                message: format!("base price {} must not be negative", self.base_price),
            });
        }
        if self.base_price > Money::MAX {
            return Err(ValidationError {
                field: "base_price".into(),
                message: format!(
                    "base price {} exceeds the maximum amount {}",
                    self.base_price,
                    Money::MAX
                ),
            });
        }

        Ok(NewReservation {
            seat_id: self.seat_id,
            user_email: crate::user::normalize_email(&self.user_email)?,
            passenger: self.passenger,
            base_price: self.base_price,
            selection: self.selection,
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
