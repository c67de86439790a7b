use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::from_reader;
use tracing::{debug, info, instrument};

use crate::{error::StockError, util::date_utils::parse_date};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DashboardConfig {
    #[serde(rename = "data-file")]
    pub data_file: PathBuf,
    #[serde(rename = "min-year")]
    pub min_year: i32,
    #[serde(rename = "max-year")]
    pub max_year: i32,
    #[serde(rename = "recent-start-year")]
    pub recent_start_year: i32,
    #[serde(rename = "recent-end-year")]
    pub recent_end_year: i32,
    #[serde(rename = "covid-start")]
    pub covid_start: String,
    #[serde(rename = "covid-end")]
    pub covid_end: String,
    #[serde(rename = "tail-rows", default = "default_tail_rows")]
    pub tail_rows: usize,
    #[serde(rename = "skip-invalid-rows", default = "default_skip_invalid_rows")]
    pub skip_invalid_rows: bool,
}

fn default_tail_rows() -> usize {
    100
}

fn default_skip_invalid_rows() -> bool {
    true
}

const DEFAULT_DATA: &str = r#"
data-file: "cipla.csv"
min-year: 1996
max-year: 2024
recent-start-year: 2014
recent-end-year: 2024
covid-start: "2020-03-01"
covid-end: "2021-12-31"
tail-rows: 100
skip-invalid-rows: true
"#;

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("cipla.csv"),
            min_year: 1996,
            max_year: 2024,
            recent_start_year: 2014,
            recent_end_year: 2024,
            covid_start: "2020-03-01".to_string(),
            covid_end: "2021-12-31".to_string(),
            tail_rows: default_tail_rows(),
            skip_invalid_rows: default_skip_invalid_rows(),
        }
    }
}

impl DashboardConfig {
    /// Reads the configuration from a YAML file.
    ///
    /// If the file does not exist, it creates a default configuration file.
    ///
    /// # Arguments
    ///
    /// * `filename` - Optional path to the configuration file.
    ///
    /// # Returns
    ///
    /// A `Result` containing the validated `DashboardConfig` on success or an `Error` on failure.
    #[instrument(level = "info", skip(filename))]
    pub fn read_config<P: AsRef<Path>>(filename: Option<P>) -> Result<Self, StockError> {
        let path = filename
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(|| Path::new("config.yml").to_path_buf());

        info!(path = %path.display(), "Reading configuration");

        if !path.exists() {
            info!(
                "Config file does not exist. Creating default config at {}",
                path.display()
            );
            let mut file = File::create(&path)?;
            file.write_all(DEFAULT_DATA.as_bytes())?;
            debug!("Default configuration file created");
            return Ok(DashboardConfig::default());
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let config: Self = from_reader(reader)?;
        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Checks the year bounds and the COVID window.
    ///
    /// # Errors
    ///
    /// `ConfigError` for inconsistent ranges, `ParseDateError` for malformed dates.
    pub fn validate(&self) -> Result<(), StockError> {
        if self.min_year >= self.max_year {
            return Err(StockError::ConfigError(format!(
                "min-year ({}) must be before max-year ({})",
                self.min_year, self.max_year
            )));
        }
        if self.recent_start_year > self.recent_end_year {
            return Err(StockError::ConfigError(format!(
                "recent-start-year ({}) must not be after recent-end-year ({})",
                self.recent_start_year, self.recent_end_year
            )));
        }
        let (start, end) = (self.covid_start()?, self.covid_end()?);
        if start > end {
            return Err(StockError::ConfigError(format!(
                "covid-start ({}) must not be after covid-end ({})",
                start, end
            )));
        }
        Ok(())
    }

    /// Converts the COVID window start to a `NaiveDate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be parsed.
    pub fn covid_start(&self) -> Result<NaiveDate, StockError> {
        Ok(parse_date(&self.covid_start)?)
    }

    pub fn covid_end(&self) -> Result<NaiveDate, StockError> {
        Ok(parse_date(&self.covid_end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_config_file_does_not_exist() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        drop(temp_file);

        assert!(!path.exists());

        let config = DashboardConfig::read_config(Some(&path)).unwrap();

        assert_eq!(config, DashboardConfig::default());
        assert!(path.exists());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_config_file_exists_valid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let yaml_content = r#"
data-file: "data/infy.csv"
min-year: 2000
max-year: 2023
recent-start-year: 2013
recent-end-year: 2023
covid-start: "2020-01-15"
covid-end: "2021-06-30"
"#;
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = DashboardConfig::read_config(Some(temp_file.path())).unwrap();

        assert_eq!(config.data_file, PathBuf::from("data/infy.csv"));
        assert_eq!(config.min_year, 2000);
        assert_eq!(config.max_year, 2023);
        assert_eq!(
            config.covid_start().unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
        );
        assert_eq!(config.tail_rows, 100);
        assert!(config.skip_invalid_rows);
    }

    #[test]
    fn compare_default_config() {
        let default_config = DashboardConfig::default();
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(DEFAULT_DATA.as_bytes()).unwrap();
        let config = DashboardConfig::read_config(Some(temp_file.path())).unwrap();
        assert_eq!(default_config, config);
    }

    #[test]
    fn test_read_config_with_missing_fields() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let yaml_content = r#"
data-file: "cipla.csv"
min-year: 1996
"#;
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let result = DashboardConfig::read_config(Some(temp_file.path()));

        assert!(matches!(result, Err(StockError::SerdeYamlError(_))));
    }

    #[test]
    fn test_read_config_with_extra_fields() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let yaml = format!("{}extra-field: \"extra\"\n", DEFAULT_DATA);
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = DashboardConfig::read_config(Some(temp_file.path())).unwrap();

        assert_eq!(config.min_year, 1996);
    }

    #[test]
    fn test_read_config_with_invalid_covid_date() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let yaml = DEFAULT_DATA.replace("\"2020-03-01\"", "\"01-03-2020\"");
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let result = DashboardConfig::read_config(Some(temp_file.path()));

        assert!(matches!(result, Err(StockError::ParseDateError(_))));
    }

    #[test]
    fn test_validate_year_bounds() {
        let config = DashboardConfig {
            min_year: 2024,
            max_year: 2024,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(StockError::ConfigError(_))));

        let config = DashboardConfig {
            recent_start_year: 2025,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(StockError::ConfigError(_))));
    }

    #[test]
    fn test_validate_inverted_covid_window() {
        let config = DashboardConfig {
            covid_start: "2022-01-01".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(StockError::ConfigError(_))));
        assert!(DashboardConfig::default().validate().is_ok());
    }
}
