//! Request command for assigning drivers to new trips.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;

use crate::Config;
use crate::commands::util::{format_datetime, parse_datetime};
use crate::fixtures::load_dispatcher;

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Passenger requesting the trip.
    pub passenger_id: i64,

    /// Number of back-to-back requests to make in this run.
    #[arg(long, default_value_t = 1)]
    pub count: u32,

    /// Trip start time (RFC 3339). Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &RequestArgs, config: &Config) -> Result<()> {
    if args.count == 0 {
        bail!("count must be at least 1");
    }
    let at = args.at.as_deref().map(parse_datetime).transpose()?;

    let mut dispatcher = load_dispatcher(config)?;
    for _ in 0..args.count {
        let start_time = at.unwrap_or_else(Utc::now);
        let Some(trip) = dispatcher.request_trip_at(args.passenger_id, start_time)? else {
            writeln!(
                writer,
                "No driver available for passenger #{}",
                args.passenger_id
            )?;
            continue;
        };

        let (trip_id, driver_id, passenger_id, start) =
            (trip.id, trip.driver_id, trip.passenger_id, trip.start_time);
        let driver = dispatcher.find_driver(driver_id.get())?;
        writeln!(
            writer,
            "Trip #{trip_id}: driver #{driver_id} ({}) assigned to passenger #{passenger_id} at {}",
            driver.name,
            format_datetime(start)
        )?;
    }
    Ok(())
}
