//! Driver selection policy.
//!
//! The default policy is least recently used: a driver who has never driven
//! is taken first, otherwise the driver whose latest trip started earliest.
//! Repeated requests therefore rotate through the pool.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::driver::Driver;
use crate::trip::{Trip, TripLog};
use crate::types::DispatchError;

/// Picks one driver from a set of eligible candidates.
///
/// Candidates are already filtered to available drivers. Implementations
/// return `None` only when `candidates` is empty.
pub trait DriverSelector: fmt::Debug + Send + Sync {
    fn select<'d>(&self, candidates: &[&'d Driver], trips: &TripLog) -> Option<&'d Driver>;
}

/// Least-recently-used selection, see [`find_new_driver`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastRecentlyUsed;

impl DriverSelector for LeastRecentlyUsed {
    fn select<'d>(&self, candidates: &[&'d Driver], trips: &TripLog) -> Option<&'d Driver> {
        find_new_driver(candidates, trips)
    }
}

/// Selects the most idle driver among `candidates`.
///
/// The first candidate with no trip history wins outright. Otherwise the
/// candidate whose most recent trip has the earliest start time wins; ties
/// keep input order.
pub fn find_new_driver<'d>(candidates: &[&'d Driver], trips: &TripLog) -> Option<&'d Driver> {
    let mut best: Option<(&'d Driver, DateTime<Utc>)> = None;

    for &driver in candidates {
        let history: Vec<&Trip> = trips.resolve(&driver.trips).collect();
        let Ok(latest) = get_most_recent_trip(&history) else {
            tracing::debug!(driver_id = %driver.id, "selected driver with no trip history");
            return Some(driver);
        };

        match best {
            Some((_, best_start)) if best_start <= latest.start_time => {}
            _ => best = Some((driver, latest.start_time)),
        }
    }

    if let Some((driver, last_trip_at)) = best {
        tracing::debug!(driver_id = %driver.id, %last_trip_at, "selected least recently used driver");
    }
    best.map(|(driver, _)| driver)
}

/// Returns the trip with the latest start time.
///
/// When several trips share the latest start time the last one in the
/// sequence is returned.
pub fn get_most_recent_trip<'t>(trips: &[&'t Trip]) -> Result<&'t Trip, DispatchError> {
    trips
        .iter()
        .copied()
        .max_by_key(|trip| trip.start_time)
        .ok_or(DispatchError::NotFound {
            what: "trip history",
        })
}
