//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// File holding driver records, one JSON object per line.
pub const DRIVERS_FILE: &str = "drivers.jsonl";

/// File holding passenger records.
pub const PASSENGERS_FILE: &str = "passengers.jsonl";

/// File holding historical trip records.
pub const TRIPS_FILE: &str = "trips.jsonl";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing the fixture files.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: dirs_data_path().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, the user config file, `config_path`,
    /// then `RIDE_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("RIDE_"));

        figment.extract()
    }

    pub fn drivers_path(&self) -> PathBuf {
        self.data_dir.join(DRIVERS_FILE)
    }

    pub fn passengers_path(&self) -> PathBuf {
        self.data_dir.join(PASSENGERS_FILE)
    }

    pub fn trips_path(&self) -> PathBuf {
        self.data_dir.join(TRIPS_FILE)
    }
}

/// Returns the platform-specific config directory for ride.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ride"))
}

/// Returns the platform-specific data directory for ride.
///
/// On Linux: `~/.local/share/ride`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ride"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_ride() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "ride");
    }

    #[test]
    fn test_default_config_uses_data_dir() {
        let config = Config::default();
        assert_eq!(config.data_dir, dirs_data_path().unwrap());
    }

    #[test]
    fn test_fixture_paths_live_in_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/srv/ride"),
        };
        assert_eq!(config.drivers_path(), PathBuf::from("/srv/ride/drivers.jsonl"));
        assert_eq!(
            config.passengers_path(),
            PathBuf::from("/srv/ride/passengers.jsonl")
        );
        assert_eq!(config.trips_path(), PathBuf::from("/srv/ride/trips.jsonl"));
    }

    #[test]
    fn test_config_file_overrides_default() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("ride.toml");
        std::fs::write(&config_path, "data_dir = \"/srv/fixtures\"\n").unwrap();

        let config = Config::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/fixtures"));
    }
}
