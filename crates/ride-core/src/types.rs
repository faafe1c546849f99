//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected caller input: malformed, out-of-range, or dangling values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    /// An identifier was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositiveId { field: &'static str, value: i64 },

    /// No driver with this id is known.
    #[error("no driver with id {0}")]
    UnknownDriver(i64),

    /// No passenger with this id is known.
    #[error("no passenger with id {0}")]
    UnknownPassenger(i64),

    /// No trip with this id is known.
    #[error("no trip with id {0}")]
    UnknownTrip(i64),

    /// The same id was loaded twice.
    #[error("duplicate {field} {value}")]
    DuplicateId { field: &'static str, value: i64 },

    /// Ratings run from 1 to 5 inclusive.
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),

    /// A cost was negative, NaN, or infinite.
    #[error("invalid cost for trip {trip}")]
    InvalidCost { trip: i64 },

    /// Status token was neither `AVAILABLE` nor `UNAVAILABLE`.
    #[error("invalid driver status: {0}")]
    UnknownStatus(String),

    /// A trip's end time precedes its start time.
    #[error("trip {trip} ends before it starts")]
    EndBeforeStart { trip: i64 },

    /// A closed trip cannot be closed again.
    #[error("trip {0} is already closed")]
    TripAlreadyClosed(i64),
}

/// Errors raised by the dispatch ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The caller supplied an invalid or unknown value.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// A lookup over an empty collection.
    #[error("{what} not found")]
    NotFound { what: &'static str },

    /// No positive id is left to assign.
    #[error("{field} space exhausted")]
    IdsExhausted { field: &'static str },
}

/// Generates a validated positive integer ID newtype.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new ID, rejecting zero and negative values.
            pub const fn new(id: i64) -> Result<Self, InvalidArgument> {
                if id <= 0 {
                    return Err(InvalidArgument::NonPositiveId {
                        field: $field_name,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Returns the raw integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = InvalidArgument;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(
    /// A validated driver identifier.
    DriverId, "driver id"
);

define_numeric_id!(
    /// A validated passenger identifier.
    PassengerId, "passenger id"
);

define_numeric_id!(
    /// A validated trip identifier.
    ///
    /// Loaded trips keep their record ids; requested trips take the next id
    /// after the highest one seen.
    TripId, "trip id"
);

impl TripId {
    /// The id given to the first trip of an empty ledger.
    pub const FIRST: Self = Self(1);

    /// The id following this one, or `None` past `i64::MAX`.
    pub(crate) const fn successor(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

/// A passenger's rating of a trip, from 1 to 5 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: Self = Self(1);

    /// Highest accepted rating.
    pub const MAX: Self = Self(5);

    /// Creates a rating after checking it lies in 1..=5.
    pub fn new(value: i64) -> Result<Self, InvalidArgument> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN.0..=Self::MAX.0).contains(v))
            .map(Self)
            .ok_or(InvalidArgument::RatingOutOfRange(value))
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = InvalidArgument;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_id_rejects_non_positive() {
        assert_eq!(
            DriverId::new(0),
            Err(InvalidArgument::NonPositiveId {
                field: "driver id",
                value: 0
            })
        );
        assert!(DriverId::new(-4).is_err());
        assert_eq!(DriverId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn test_passenger_id_serde_rejects_zero() {
        let result: Result<PassengerId, _> = serde_json::from_str("0");
        assert!(result.is_err());

        let parsed: PassengerId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed.get(), 12);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "12");
    }

    #[test]
    fn test_trip_id_successor_increments() {
        assert_eq!(TripId::FIRST.successor().map(TripId::get), Some(2));
    }

    #[test]
    fn test_trip_id_successor_stops_at_max() {
        let last = TripId::new(i64::MAX).unwrap();
        assert_eq!(last.successor(), None);
    }

    #[test]
    fn test_rating_validates_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(300).is_err());
        assert_eq!(Rating::new(1).unwrap(), Rating::MIN);
        assert_eq!(Rating::new(5).unwrap(), Rating::MAX);
    }

    #[test]
    fn test_rating_serde_rejects_out_of_range() {
        let result: Result<Rating, _> = serde_json::from_str("9");
        assert!(result.is_err());

        let parsed: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.value(), 4);
    }

    #[test]
    fn test_dispatch_error_wraps_invalid_argument() {
        let err = DispatchError::from(InvalidArgument::UnknownDriver(42));
        assert_eq!(err.to_string(), "invalid argument: no driver with id 42");
    }
}
