//! Raw records handed over by the ingestion layer.
//!
//! Records carry unvalidated ids and status tokens. Timestamps are already
//! parsed. Conversion into entities validates every field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::passenger::Passenger;
use crate::trip::{Trip, check_cost, check_end_time};
use crate::types::{DriverId, InvalidArgument, PassengerId, Rating, TripId};

/// A driver as loaded from a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: i64,
    pub name: String,
    /// Status token, `AVAILABLE` or `UNAVAILABLE`.
    pub status: String,
}

/// A passenger as loaded from a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// A historical trip as loaded from a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: i64,
    pub driver_id: i64,
    pub passenger_id: i64,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl TryFrom<DriverRecord> for Driver {
    type Error = InvalidArgument;

    fn try_from(record: DriverRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.name, record.status.parse()?)
    }
}

impl TryFrom<PassengerRecord> for Passenger {
    type Error = InvalidArgument;

    fn try_from(record: PassengerRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.name, record.phone)
    }
}

impl TryFrom<TripRecord> for Trip {
    type Error = InvalidArgument;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        let id = TripId::new(record.id)?;
        check_end_time(id, record.start_time, record.end_time)?;
        check_cost(id, record.cost)?;
        Ok(Self {
            id,
            driver_id: DriverId::new(record.driver_id)?,
            passenger_id: PassengerId::new(record.passenger_id)?,
            start_time: record.start_time,
            end_time: record.end_time,
            cost: record.cost,
            rating: record.rating.map(Rating::new).transpose()?,
        })
    }
}
