use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::*;

/// Dashboard settings layered from defaults, an optional TOML file and the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardSettings {
    pub data_file: PathBuf,

    pub abbreviation_file: PathBuf,

    #[validate(length(min = 4))]
    pub default_city: String,

    #[validate(range(min = 1))]
    pub min_population: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(CRIME_DATA_FILE),
            abbreviation_file: PathBuf::from(ABBREVIATION_FILE),
            default_city: DEFAULT_CITY.to_string(),
            min_population: MIN_CITY_POPULATION,
        }
    }
}

impl DashboardSettings {
    /// Load settings; `CRIME_DASHBOARD__DEFAULT_CITY` style variables override the file
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("data_file", defaults.data_file.to_string_lossy().to_string())?
            .set_default(
                "abbreviation_file",
                defaults.abbreviation_file.to_string_lossy().to_string(),
            )?
            .set_default("default_city", defaults.default_city)?
            .set_default("min_population", defaults.min_population)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(SETTINGS_FILE).required(false)),
        };

        let settings: DashboardSettings = builder
            .add_source(
                Environment::with_prefix(SETTINGS_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_file = path;
        }
        self
    }

    pub fn with_abbreviation_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.abbreviation_file = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::Builder;

    // `load` reads process-wide environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.default_city, "New York, NY");
        assert_eq!(settings.min_population, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let _guard = env_lock();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "default_city = \"Chicago, IL\"")?;
        writeln!(file, "min_population = 5000")?;

        let settings = DashboardSettings::load(Some(file.path()))?;

        assert_eq!(settings.default_city, "Chicago, IL");
        assert_eq!(settings.min_population, 5000);
        assert_eq!(settings.data_file, PathBuf::from("df_for_dash.csv"));
        Ok(())
    }

    #[test]
    fn test_invalid_file_values() -> Result<()> {
        let _guard = env_lock();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "min_population = 0")?;

        assert!(DashboardSettings::load(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let _guard = env_lock();
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "default_city = \"Chicago, IL\"")?;
        writeln!(file, "min_population = 5000")?;

        std::env::set_var("CRIME_DASHBOARD__DEFAULT_CITY", "Dayton, OH");
        std::env::set_var("CRIME_DASHBOARD__MIN_POPULATION", "2500");
        let loaded = DashboardSettings::load(Some(file.path()));
        std::env::remove_var("CRIME_DASHBOARD__DEFAULT_CITY");
        std::env::remove_var("CRIME_DASHBOARD__MIN_POPULATION");

        let settings = loaded?;
        assert_eq!(settings.default_city, "Dayton, OH");
        assert_eq!(settings.min_population, 2500);
        assert_eq!(settings.abbreviation_file, PathBuf::from("ABBRV.csv"));
        Ok(())
    }

    #[test]
    fn test_path_overrides() {
        let settings = DashboardSettings::default()
            .with_data_file(Some(PathBuf::from("data/crime.csv")))
            .with_abbreviation_file(None);

        assert_eq!(settings.data_file, PathBuf::from("data/crime.csv"));
        assert_eq!(settings.abbreviation_file, PathBuf::from("ABBRV.csv"));
    }
}
