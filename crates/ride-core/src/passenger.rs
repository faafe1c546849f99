//! Passengers and their spend and ride-time aggregates.

use serde::Serialize;

use crate::trip::TripLog;
use crate::types::{DriverId, InvalidArgument, PassengerId, TripId};

/// A passenger and the trips they have taken, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
    pub phone_number: String,
    pub trips: Vec<TripId>,
}

impl Passenger {
    /// Creates a passenger with no trip history.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            id: PassengerId::new(id)?,
            name: name.into(),
            phone_number: phone_number.into(),
            trips: Vec::new(),
        })
    }

    /// Appends a trip to the passenger's history. Duplicates are not checked.
    pub fn add_trip(&mut self, trip: TripId) {
        self.trips.push(trip);
    }

    /// Sum of trip costs. Trips without a cost count as zero.
    pub fn total_spent(&self, log: &TripLog) -> f64 {
        log.resolve(&self.trips)
            .map(|trip| trip.cost.unwrap_or(0.0))
            .sum()
    }

    /// Total ride time in seconds over closed trips.
    ///
    /// Open trips have no duration yet and are left out.
    pub fn total_time(&self, log: &TripLog) -> i64 {
        log.resolve(&self.trips)
            .filter_map(|trip| trip.duration_in_seconds())
            .sum()
    }

    /// The driver of each trip, in trip order. Repeat drivers appear once per trip.
    pub fn get_drivers(&self, log: &TripLog) -> Vec<DriverId> {
        log.resolve(&self.trips).map(|trip| trip.driver_id).collect()
    }

    /// Drivers who have served this passenger, first-seen order, no repeats.
    pub fn distinct_drivers(&self, log: &TripLog) -> Vec<DriverId> {
        let mut seen = Vec::new();
        for driver in self.get_drivers(log) {
            if !seen.contains(&driver) {
                seen.push(driver);
            }
        }
        seen
    }
}
