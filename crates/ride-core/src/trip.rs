//! Trips and the trip log that owns them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{DispatchError, DriverId, InvalidArgument, PassengerId, Rating, TripId};

/// A single ride linking one driver and one passenger.
///
/// A trip is open while `end_time` is `None`. Open trips also carry no cost
/// and no rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub id: TripId,
    pub driver_id: DriverId,
    pub passenger_id: PassengerId,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub rating: Option<Rating>,
}

impl Trip {
    /// Creates an open trip starting at `start_time`.
    pub const fn open(
        id: TripId,
        driver_id: DriverId,
        passenger_id: PassengerId,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            driver_id,
            passenger_id,
            start_time,
            end_time: None,
            cost: None,
            rating: None,
        }
    }

    /// Returns true while the trip has no end time.
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed seconds between start and end, `None` for open trips.
    pub fn duration_in_seconds(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_seconds())
    }

    /// Closes the trip with its final end time, cost and rating.
    pub(crate) fn close(
        &mut self,
        end_time: DateTime<Utc>,
        cost: Option<f64>,
        rating: Option<Rating>,
    ) -> Result<(), InvalidArgument> {
        if !self.is_open() {
            return Err(InvalidArgument::TripAlreadyClosed(self.id.get()));
        }
        check_end_time(self.id, self.start_time, Some(end_time))?;
        check_cost(self.id, cost)?;
        self.end_time = Some(end_time);
        self.cost = cost;
        self.rating = rating;
        Ok(())
    }
}

/// Rejects end times earlier than the start.
pub(crate) fn check_end_time(
    id: TripId,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
) -> Result<(), InvalidArgument> {
    match end_time {
        Some(end) if end < start_time => Err(InvalidArgument::EndBeforeStart { trip: id.get() }),
        _ => Ok(()),
    }
}

/// Rejects negative or non-finite costs.
pub(crate) fn check_cost(id: TripId, cost: Option<f64>) -> Result<(), InvalidArgument> {
    match cost {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(InvalidArgument::InvalidCost { trip: id.get() })
        }
        _ => Ok(()),
    }
}

/// Canonical store of trips in creation order, indexed by id.
///
/// Drivers and passengers hold [`TripId`]s into this log rather than the
/// trips themselves.
#[derive(Debug, Clone, Default)]
pub struct TripLog {
    trips: Vec<Trip>,
    index: HashMap<TripId, usize>,
    max_id: Option<TripId>,
}

impl TripLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trips in the log.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Returns true if no trips have been recorded.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Trips in creation order.
    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }

    /// Iterates trips in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Looks up a trip by id.
    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.index.get(&id).and_then(|&pos| self.trips.get(pos))
    }

    pub(crate) fn get_mut(&mut self, id: TripId) -> Option<&mut Trip> {
        self.index.get(&id).and_then(|&pos| self.trips.get_mut(pos))
    }

    /// Resolves a sequence of trip ids, in the given order.
    pub fn resolve<'a>(&'a self, ids: &'a [TripId]) -> impl Iterator<Item = &'a Trip> + 'a {
        ids.iter().filter_map(|&id| self.get(id))
    }

    /// Id to assign to the next trip created by dispatch.
    ///
    /// Fails once the highest loaded id is `i64::MAX`.
    pub fn next_id(&self) -> Result<TripId, DispatchError> {
        match self.max_id {
            None => Ok(TripId::FIRST),
            Some(max) => max
                .successor()
                .ok_or(DispatchError::IdsExhausted { field: "trip id" }),
        }
    }

    /// Appends a trip, rejecting ids already present.
    pub(crate) fn push(&mut self, trip: Trip) -> Result<(), InvalidArgument> {
        if self.index.contains_key(&trip.id) {
            return Err(InvalidArgument::DuplicateId {
                field: "trip id",
                value: trip.id.get(),
            });
        }
        self.max_id = Some(self.max_id.map_or(trip.id, |max| max.max(trip.id)));
        self.index.insert(trip.id, self.trips.len());
        self.trips.push(trip);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TripLog {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
