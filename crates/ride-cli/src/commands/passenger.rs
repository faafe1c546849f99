//! Passenger command for showing spend and ride-time aggregates.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::commands::util::format_duration;
use crate::fixtures::load_dispatcher;

#[derive(Debug, Args)]
pub struct PassengerArgs {
    /// Passenger ID.
    pub id: i64,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &PassengerArgs, config: &Config) -> Result<()> {
    let dispatcher = load_dispatcher(config)?;
    let summary = dispatcher.passenger_summary(args.id)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    let drivers = if summary.drivers.is_empty() {
        "none".to_string()
    } else {
        summary
            .drivers
            .iter()
            .map(|id| format!("#{id}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    writeln!(writer, "Passenger #{}: {}", summary.id, summary.name)?;
    writeln!(writer, "Phone: {}", summary.phone_number)?;
    writeln!(writer, "Trips: {}", summary.trip_count)?;
    writeln!(writer, "Total spent: ${:.2}", summary.total_spent)?;
    writeln!(
        writer,
        "Total time: {}",
        format_duration(summary.total_time_seconds)
    )?;
    writeln!(writer, "Drivers: {drivers}")?;
    Ok(())
}
