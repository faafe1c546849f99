//! Core domain logic for the ride dispatch ledger.
//!
//! This crate contains the fundamental types and logic for:
//! - Entities: drivers, passengers and the trips linking them
//! - Availability: which drivers may take a new trip
//! - Selection: least-recently-used driver assignment
//! - Dispatch: trip requests, completion and cross-linking

mod availability;
pub mod dispatcher;
pub mod driver;
pub mod passenger;
pub mod records;
pub mod selection;
pub mod trip;
pub mod types;

pub use availability::removes_unavailable_drivers;
pub use dispatcher::{Dispatcher, DriverSummary, PassengerSummary};
pub use driver::{Driver, DriverStatus};
pub use passenger::Passenger;
pub use records::{DriverRecord, PassengerRecord, TripRecord};
pub use selection::{DriverSelector, LeastRecentlyUsed, find_new_driver, get_most_recent_trip};
pub use trip::{Trip, TripLog};
pub use types::{DispatchError, DriverId, InvalidArgument, PassengerId, Rating, TripId};
