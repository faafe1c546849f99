//! Driver command for showing one driver's summary.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::fixtures::load_dispatcher;

#[derive(Debug, Args)]
pub struct DriverArgs {
    /// Driver ID.
    pub id: i64,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &DriverArgs, config: &Config) -> Result<()> {
    let dispatcher = load_dispatcher(config)?;
    let summary = dispatcher.driver_summary(args.id)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    writeln!(writer, "Driver #{}: {}", summary.id, summary.name)?;
    writeln!(writer, "Status: {}", summary.status)?;
    writeln!(writer, "Trips: {}", summary.trip_count)?;
    match summary.average_rating {
        Some(rating) => writeln!(writer, "Average rating: {rating:.2}")?,
        None => writeln!(writer, "Average rating: n/a")?,
    }
    match summary.open_trip {
        Some(trip) => writeln!(writer, "Open trip: #{trip}")?,
        None => writeln!(writer, "Open trip: none")?,
    }
    Ok(())
}
