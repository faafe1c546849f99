//! Drivers command for listing the driver pool.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use ride_core::Driver;

use crate::Config;
use crate::fixtures::load_dispatcher;

#[derive(Debug, Args)]
pub struct DriversArgs {
    /// Only list drivers who can take a trip now.
    #[arg(long)]
    pub available: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &DriversArgs, config: &Config) -> Result<()> {
    let dispatcher = load_dispatcher(config)?;
    let drivers: Vec<&Driver> = if args.available {
        dispatcher.removes_unavailable_drivers()
    } else {
        dispatcher.drivers().iter().collect()
    };

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&drivers)?)?;
        return Ok(());
    }

    if drivers.is_empty() {
        writeln!(writer, "No drivers found.")?;
        return Ok(());
    }

    for driver in drivers {
        let trips = driver.trips.len();
        let noun = if trips == 1 { "trip" } else { "trips" };
        writeln!(
            writer,
            "#{} {} [{}] {trips} {noun}",
            driver.id, driver.name, driver.status
        )?;
    }
    Ok(())
}
