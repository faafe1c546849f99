//! The dispatcher: canonical owner of drivers, passengers and trips.
//!
//! # Thread Safety
//!
//! All mutation goes through `&mut self`, so a single owner can never observe
//! a driver selected by one request and not yet marked unavailable. To serve
//! several clients at once, wrap the dispatcher in a `Mutex<Dispatcher>` and
//! hold the lock for the whole of [`Dispatcher::request_trip`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::availability::removes_unavailable_drivers;
use crate::driver::{Driver, DriverStatus};
use crate::passenger::Passenger;
use crate::records::{DriverRecord, PassengerRecord, TripRecord};
use crate::selection::{DriverSelector, LeastRecentlyUsed};
use crate::trip::{Trip, TripLog};
use crate::types::{DispatchError, DriverId, InvalidArgument, PassengerId, Rating, TripId};

/// Aggregate root of the ride ledger.
///
/// Drivers and passengers are kept sorted by id. Trips are kept in creation
/// order. Every trip id held by a driver or passenger exists in the trip log,
/// and every logged trip is held by exactly one driver and one passenger.
#[derive(Debug)]
pub struct Dispatcher {
    drivers: Vec<Driver>,
    passengers: Vec<Passenger>,
    trips: TripLog,
    selector: Box<dyn DriverSelector>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            drivers: Vec::new(),
            passengers: Vec::new(),
            trips: TripLog::new(),
            selector: Box::new(LeastRecentlyUsed),
        }
    }
}

/// Aggregates for one passenger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerSummary {
    pub id: PassengerId,
    pub name: String,
    pub phone_number: String,
    pub trip_count: usize,
    pub total_spent: f64,
    pub total_time_seconds: i64,
    pub drivers: Vec<DriverId>,
}

/// Aggregates for one driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSummary {
    pub id: DriverId,
    pub name: String,
    pub status: DriverStatus,
    pub trip_count: usize,
    pub average_rating: Option<f64>,
    pub open_trip: Option<TripId>,
}

impl Dispatcher {
    /// Creates an empty dispatcher using least-recently-used selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dispatcher from ingested records.
    ///
    /// Drivers and passengers are sorted by id. Trips keep record order and
    /// are linked to their driver and passenger as they are loaded.
    pub fn from_records(
        drivers: Vec<DriverRecord>,
        passengers: Vec<PassengerRecord>,
        trips: Vec<TripRecord>,
    ) -> Result<Self, DispatchError> {
        let mut drivers = drivers
            .into_iter()
            .map(Driver::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        drivers.sort_by_key(|driver| driver.id);
        reject_duplicates(drivers.iter().map(|d| d.id.get()), "driver id")?;

        let mut passengers = passengers
            .into_iter()
            .map(Passenger::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        passengers.sort_by_key(|passenger| passenger.id);
        reject_duplicates(passengers.iter().map(|p| p.id.get()), "passenger id")?;

        let mut dispatcher = Self {
            drivers,
            passengers,
            ..Self::default()
        };
        for record in trips {
            dispatcher.link_trip(Trip::try_from(record)?)?;
        }

        tracing::debug!(
            drivers = dispatcher.drivers.len(),
            passengers = dispatcher.passengers.len(),
            trips = dispatcher.trips.len(),
            "loaded dispatcher state"
        );
        Ok(dispatcher)
    }

    /// Replaces the driver selection policy.
    #[must_use]
    pub fn with_selector(mut self, selector: impl DriverSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Drivers, sorted by id.
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// Passengers, sorted by id.
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// All trips, in creation order.
    pub const fn trips(&self) -> &TripLog {
        &self.trips
    }

    /// Looks up a driver by id.
    pub fn find_driver(&self, id: i64) -> Result<&Driver, DispatchError> {
        let id = DriverId::new(id)?;
        self.drivers
            .iter()
            .find(|driver| driver.id == id)
            .ok_or_else(|| InvalidArgument::UnknownDriver(id.get()).into())
    }

    /// Looks up a passenger by id.
    pub fn find_passenger(&self, id: i64) -> Result<&Passenger, DispatchError> {
        let id = PassengerId::new(id)?;
        self.passengers
            .iter()
            .find(|passenger| passenger.id == id)
            .ok_or_else(|| InvalidArgument::UnknownPassenger(id.get()).into())
    }

    /// Looks up a trip by id.
    pub fn find_trip(&self, id: i64) -> Result<&Trip, DispatchError> {
        let id = TripId::new(id)?;
        self.trips
            .get(id)
            .ok_or_else(|| InvalidArgument::UnknownTrip(id.get()).into())
    }

    /// Drivers currently eligible for assignment, in id order.
    pub fn removes_unavailable_drivers(&self) -> Vec<&Driver> {
        removes_unavailable_drivers(&self.drivers)
    }

    /// Applies the selection policy to `candidates`.
    pub fn find_new_driver<'d>(&self, candidates: &[&'d Driver]) -> Option<&'d Driver> {
        self.selector.select(candidates, &self.trips)
    }

    /// Requests a trip for a passenger, starting now.
    ///
    /// See [`Dispatcher::request_trip_at`].
    pub fn request_trip(&mut self, passenger_id: i64) -> Result<Option<&Trip>, DispatchError> {
        self.request_trip_at(passenger_id, Utc::now())
    }

    /// Requests a trip for a passenger, starting at `start_time`.
    ///
    /// Returns `Ok(None)` and changes nothing when no driver is available.
    /// Otherwise the selected driver becomes unavailable and the new open
    /// trip is linked to the trip log, the driver and the passenger.
    pub fn request_trip_at(
        &mut self,
        passenger_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Option<&Trip>, DispatchError> {
        let passenger_id = self.find_passenger(passenger_id)?.id;

        let selected = {
            let candidates = self.removes_unavailable_drivers();
            self.find_new_driver(&candidates).map(|driver| driver.id)
        };
        let Some(driver_id) = selected else {
            tracing::warn!(%passenger_id, "no driver available");
            return Ok(None);
        };

        let trip = Trip::open(self.trips.next_id()?, driver_id, passenger_id, start_time);
        let trip_id = trip.id;
        self.link_trip(trip)?;
        if let Some(driver) = self.driver_mut(driver_id) {
            driver.status = DriverStatus::Unavailable;
        }

        tracing::info!(%trip_id, %driver_id, %passenger_id, "trip requested");
        self.trips
            .get(trip_id)
            .map(Some)
            .ok_or(DispatchError::NotFound { what: "trip" })
    }

    /// Closes an open trip.
    ///
    /// The driver returns to the available pool once none of their trips
    /// remain open.
    pub fn complete_trip(
        &mut self,
        trip_id: i64,
        end_time: DateTime<Utc>,
        cost: Option<f64>,
        rating: Option<Rating>,
    ) -> Result<&Trip, DispatchError> {
        let trip_id = TripId::new(trip_id)?;
        let trip = self
            .trips
            .get_mut(trip_id)
            .ok_or(InvalidArgument::UnknownTrip(trip_id.get()))?;
        trip.close(end_time, cost, rating)?;
        let driver_id = trip.driver_id;

        let still_driving = self
            .find_driver(driver_id.get())
            .is_ok_and(|driver| self.trips.resolve(&driver.trips).any(Trip::is_open));
        if still_driving {
            tracing::debug!(%driver_id, "driver still has an open trip");
        } else if let Some(driver) = self.driver_mut(driver_id) {
            driver.status = DriverStatus::Available;
        }

        tracing::info!(%trip_id, %driver_id, "trip completed");
        self.trips
            .get(trip_id)
            .ok_or(DispatchError::NotFound { what: "trip" })
    }

    /// Spend, ride time and driver aggregates for a passenger.
    pub fn passenger_summary(&self, id: i64) -> Result<PassengerSummary, DispatchError> {
        let passenger = self.find_passenger(id)?;
        Ok(PassengerSummary {
            id: passenger.id,
            name: passenger.name.clone(),
            phone_number: passenger.phone_number.clone(),
            trip_count: passenger.trips.len(),
            total_spent: passenger.total_spent(&self.trips),
            total_time_seconds: passenger.total_time(&self.trips),
            drivers: passenger.distinct_drivers(&self.trips),
        })
    }

    /// Status and rating aggregates for a driver.
    pub fn driver_summary(&self, id: i64) -> Result<DriverSummary, DispatchError> {
        let driver = self.find_driver(id)?;
        let open_trip = self
            .trips
            .resolve(&driver.trips)
            .filter(|trip| trip.is_open())
            .last()
            .map(|trip| trip.id);
        Ok(DriverSummary {
            id: driver.id,
            name: driver.name.clone(),
            status: driver.status,
            trip_count: driver.trips.len(),
            average_rating: driver.average_rating(&self.trips),
            open_trip,
        })
    }

    /// Adds a trip to the log and to its driver's and passenger's histories.
    ///
    /// Validates both references before touching any collection.
    fn link_trip(&mut self, trip: Trip) -> Result<(), DispatchError> {
        let (trip_id, driver_id, passenger_id) = (trip.id, trip.driver_id, trip.passenger_id);
        if self.driver_mut(driver_id).is_none() {
            return Err(InvalidArgument::UnknownDriver(driver_id.get()).into());
        }
        if self.passenger_mut(passenger_id).is_none() {
            return Err(InvalidArgument::UnknownPassenger(passenger_id.get()).into());
        }

        self.trips.push(trip)?;
        if let Some(driver) = self.driver_mut(driver_id) {
            driver.add_trip(trip_id);
        }
        if let Some(passenger) = self.passenger_mut(passenger_id) {
            passenger.add_trip(trip_id);
        }
        Ok(())
    }

    fn driver_mut(&mut self, id: DriverId) -> Option<&mut Driver> {
        self.drivers.iter_mut().find(|driver| driver.id == id)
    }

    fn passenger_mut(&mut self, id: PassengerId) -> Option<&mut Passenger> {
        self.passengers
            .iter_mut()
            .find(|passenger| passenger.id == id)
    }
}

/// Fails on the first repeated id in an id-sorted sequence.
fn reject_duplicates(
    ids: impl Iterator<Item = i64>,
    field: &'static str,
) -> Result<(), InvalidArgument> {
    let mut previous = None;
    for id in ids {
        if previous == Some(id) {
            return Err(InvalidArgument::DuplicateId { field, value: id });
        }
        previous = Some(id);
    }
    Ok(())
}
