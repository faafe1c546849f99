//! Ride dispatch ledger CLI library.
//!
//! This crate provides the CLI interface and fixture loading for the
//! dispatch ledger.

mod cli;
pub mod commands;
mod config;
pub mod fixtures;

pub use cli::{Cli, Commands};
pub use config::Config;
