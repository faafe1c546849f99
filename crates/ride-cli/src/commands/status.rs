//! Status command for showing ledger counts.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::fixtures::load_dispatcher;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let dispatcher = load_dispatcher(config)?;

    let drivers = dispatcher.drivers();
    let available = dispatcher.removes_unavailable_drivers().len();
    let trips = dispatcher.trips();
    let open = trips.iter().filter(|trip| trip.is_open()).count();

    writeln!(writer, "Ride dispatch status")?;
    writeln!(writer, "Data directory: {}", config.data_dir.display())?;
    writeln!(
        writer,
        "Drivers: {} ({available} available, {} unavailable)",
        drivers.len(),
        drivers.len() - available
    )?;
    writeln!(writer, "Passengers: {}", dispatcher.passengers().len())?;
    writeln!(
        writer,
        "Trips: {} ({open} open, {} closed)",
        trips.len(),
        trips.len() - open
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::fixtures::write_sample;

    #[test]
    fn test_status_command_outputs_counts() {
        let temp = tempfile::tempdir().unwrap();
        write_sample(temp.path());
        let config = Config {
            data_dir: temp.path().to_path_buf(),
        };

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&temp.path().display().to_string(), "[TEMP]");
        assert_snapshot!(output, @r"
        Ride dispatch status
        Data directory: [TEMP]
        Drivers: 3 (2 available, 1 unavailable)
        Passengers: 2
        Trips: 3 (0 open, 3 closed)
        ");
    }

    #[test]
    fn test_status_command_fails_without_fixtures() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: temp.path().join("missing"),
        };

        let mut output = Vec::new();
        let err = run(&mut output, &config).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
        assert!(output.is_empty());
    }
}
