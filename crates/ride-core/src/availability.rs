//! Availability filtering over a driver pool.

use crate::driver::Driver;

/// Returns the drivers currently eligible for assignment, in input order.
///
/// An empty result means no driver can take a trip right now; it is not an
/// error.
pub fn removes_unavailable_drivers<'a, I>(drivers: I) -> Vec<&'a Driver>
where
    I: IntoIterator<Item = &'a Driver>,
{
    drivers
        .into_iter()
        .filter(|driver| driver.is_available())
        .collect()
}
