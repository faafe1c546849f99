//! Fixture ingestion: JSONL driver, passenger and trip records.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use ride_core::{Dispatcher, DriverRecord, PassengerRecord, TripRecord};

use crate::Config;

/// Loads all fixture files and builds the dispatcher.
///
/// The trips file is optional; a missing file means an empty trip history.
pub fn load_dispatcher(config: &Config) -> Result<Dispatcher> {
    let drivers: Vec<DriverRecord> = read_records(&config.drivers_path())?;
    let passengers: Vec<PassengerRecord> = read_records(&config.passengers_path())?;

    let trips_path = config.trips_path();
    let trips: Vec<TripRecord> = if trips_path.exists() {
        read_records(&trips_path)?
    } else {
        tracing::debug!(path = %trips_path.display(), "no trips file, starting with empty history");
        Vec::new()
    };

    Dispatcher::from_records(drivers, passengers, trips)
        .with_context(|| format!("inconsistent fixtures in {}", config.data_dir.display()))
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_records(BufReader::new(file))
        .with_context(|| format!("failed to load {}", path.display()))
}

fn parse_records<T: DeserializeOwned, R: BufRead>(reader: R) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            tracing::trace!(line = idx + 1, "skipping blank line");
            continue;
        }
        let record = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid record on line {}", idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Writes a small three-driver, two-passenger fixture set into `dir`.
#[cfg(test)]
pub(crate) fn write_sample(dir: &Path) {
    use crate::config::{DRIVERS_FILE, PASSENGERS_FILE, TRIPS_FILE};

    std::fs::write(
        dir.join(DRIVERS_FILE),
        r#"{"id":1,"name":"Bernardo Prosacco","status":"UNAVAILABLE"}
{"id":2,"name":"Emory Rosenbaum","status":"AVAILABLE"}
{"id":3,"name":"Minnie Dach","status":"AVAILABLE"}
"#,
    )
    .unwrap();
    std::fs::write(
        dir.join(PASSENGERS_FILE),
        r#"{"id":1,"name":"Nina Hintz Sr.","phone":"560.815.3059"}
{"id":2,"name":"Miss Isom Gleason","phone":"791-114-8423"}
"#,
    )
    .unwrap();
    std::fs::write(
        dir.join(TRIPS_FILE),
        r#"{"id":1,"driver_id":1,"passenger_id":1,"start_time":"2016-04-05T14:01:00Z","end_time":"2016-04-05T14:30:00Z","cost":23.45,"rating":3}
{"id":2,"driver_id":2,"passenger_id":1,"start_time":"2016-06-10T09:00:00Z","end_time":"2016-06-10T09:20:00Z","cost":12.0,"rating":5}
{"id":3,"driver_id":3,"passenger_id":2,"start_time":"2016-02-01T18:00:00Z","end_time":"2016-02-01T18:45:00Z","rating":4}
"#,
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    #[test]
    fn test_parse_records_skips_blank_lines() {
        let input = "{\"id\":1,\"name\":\"Nina Hintz Sr.\",\"phone\":\"560.815.3059\"}\n\n   \n{\"id\":2,\"name\":\"Miss Isom Gleason\"}\n";
        let records: Vec<PassengerRecord> = parse_records(Cursor::new(input)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].phone, "");
    }

    #[test]
    fn test_parse_records_reports_line_number() {
        let input = "{\"id\":1,\"name\":\"A\",\"status\":\"AVAILABLE\"}\n{\"id\":2,\"name\":\"B\"}\n";
        let err = parse_records::<DriverRecord, _>(Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("invalid record on line 2"));
    }

    #[test]
    fn test_load_dispatcher_links_sample_fixtures() {
        let temp = tempfile::tempdir().unwrap();
        write_sample(temp.path());
        let config = Config {
            data_dir: temp.path().to_path_buf(),
        };

        let dispatcher = load_dispatcher(&config).unwrap();
        assert_eq!(dispatcher.drivers().len(), 3);
        assert_eq!(dispatcher.passengers().len(), 2);
        assert_eq!(dispatcher.trips().len(), 3);
        assert_eq!(dispatcher.find_passenger(1).unwrap().trips.len(), 2);
    }

    #[test]
    fn test_load_dispatcher_tolerates_missing_trips_file() {
        let temp = tempfile::tempdir().unwrap();
        write_sample(temp.path());
        std::fs::remove_file(temp.path().join(crate::config::TRIPS_FILE)).unwrap();
        let config = Config {
            data_dir: temp.path().to_path_buf(),
        };

        let dispatcher = load_dispatcher(&config).unwrap();
        assert!(dispatcher.trips().is_empty());
    }

    #[test]
    fn test_load_dispatcher_requires_drivers_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: temp.path().to_path_buf(),
        };

        let err = load_dispatcher(&config).unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn test_load_dispatcher_rejects_dangling_trip() {
        let temp = tempfile::tempdir().unwrap();
        write_sample(temp.path());
        std::fs::write(
            temp.path().join(crate::config::TRIPS_FILE),
            r#"{"id":1,"driver_id":9,"passenger_id":1,"start_time":"2016-04-05T14:01:00Z"}"#,
        )
        .unwrap();
        let config = Config {
            data_dir: temp.path().to_path_buf(),
        };

        let err = load_dispatcher(&config).unwrap_err();
        assert!(err.to_string().contains("inconsistent fixtures"));
        assert!(format!("{err:#}").contains("no driver with id 9"));
    }
}
