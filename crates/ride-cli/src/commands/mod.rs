//! CLI subcommand implementations.

pub mod driver;
pub mod drivers;
pub mod passenger;
pub mod request;
pub mod status;
mod util;
