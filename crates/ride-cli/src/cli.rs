//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::driver::DriverArgs;
use crate::commands::drivers::DriversArgs;
use crate::commands::passenger::PassengerArgs;
use crate::commands::request::RequestArgs;

/// Ride dispatch ledger.
///
/// Loads drivers, passengers and trip history from JSONL fixtures and
/// assigns the least recently used available driver to new trip requests.
#[derive(Debug, Parser)]
#[command(name = "ride", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show driver, passenger and trip counts.
    Status,

    /// List drivers.
    Drivers(DriversArgs),

    /// Show a driver's status, history and rating.
    Driver(DriverArgs),

    /// Show a passenger's spend, ride time and drivers.
    Passenger(PassengerArgs),

    /// Request one or more trips for a passenger.
    Request(RequestArgs),
}
