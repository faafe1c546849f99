use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ride_cli::commands::{driver, drivers, passenger, request, status};
use ride_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Status) => {
            let config = load_config(cli.config.as_deref())?;
            status::run(&mut out, &config)?;
        }
        Some(Commands::Drivers(args)) => {
            let config = load_config(cli.config.as_deref())?;
            drivers::run(&mut out, args, &config)?;
        }
        Some(Commands::Driver(args)) => {
            let config = load_config(cli.config.as_deref())?;
            driver::run(&mut out, args, &config)?;
        }
        Some(Commands::Passenger(args)) => {
            let config = load_config(cli.config.as_deref())?;
            passenger::run(&mut out, args, &config)?;
        }
        Some(Commands::Request(args)) => {
            let config = load_config(cli.config.as_deref())?;
            request::run(&mut out, args, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    Ok(())
}
