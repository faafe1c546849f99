//! Drivers and their availability status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::trip::TripLog;
use crate::types::{DriverId, InvalidArgument, TripId};

/// Whether a driver may be assigned a new trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverStatus {
    #[default]
    Available,
    Unavailable,
}

impl DriverStatus {
    /// Returns the status token used in fixture records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverStatus {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("available") {
            Ok(Self::Available)
        } else if token.eq_ignore_ascii_case("unavailable") {
            Ok(Self::Unavailable)
        } else {
            Err(InvalidArgument::UnknownStatus(s.to_string()))
        }
    }
}

impl Serialize for DriverStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DriverStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A driver and the trips they have been assigned, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub status: DriverStatus,
    pub trips: Vec<TripId>,
}

impl Driver {
    /// Creates a driver with no trip history.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        status: DriverStatus,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            id: DriverId::new(id)?,
            name: name.into(),
            status,
            trips: Vec::new(),
        })
    }

    pub const fn is_available(&self) -> bool {
        matches!(self.status, DriverStatus::Available)
    }

    /// Appends a trip to the driver's history. Duplicates are not checked.
    pub fn add_trip(&mut self, trip: TripId) {
        self.trips.push(trip);
    }

    /// Mean rating over the driver's rated trips, `None` if none are rated.
    pub fn average_rating(&self, log: &TripLog) -> Option<f64> {
        let (sum, count) = log
            .resolve(&self.trips)
            .filter_map(|trip| trip.rating)
            .fold((0u32, 0u32), |(sum, count), rating| {
                (sum + u32::from(rating.value()), count + 1)
            });
        (count > 0).then(|| f64::from(sum) / f64::from(count))
    }
}
