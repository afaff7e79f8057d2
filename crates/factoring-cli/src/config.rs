//! CLI configuration.
//!
//! Optional TOML file (default `factor.toml` in the working directory) that
//! supplies defaults the flags do not: the interest convention, scenario
//! lists for sweeps, letter-of-credit rates and the log level. A missing file
//! means built-in defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};

use factoring_core::factoring::InterestConvention;
use factoring_core::lc_comparison::LcRates;
use factoring_core::sensitivity::{DEFAULT_RATE_SCENARIOS, DEFAULT_TENOR_SCENARIOS};
use factoring_core::Rate;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "factor.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// tracing filter directive used when RUST_LOG is unset, e.g. "info".
    pub log_level: String,
    pub interest_convention: InterestConvention,
    pub scenarios: ScenarioDefaults,
    pub letter_of_credit: LcRates,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            interest_convention: InterestConvention::default(),
            scenarios: ScenarioDefaults::default(),
            letter_of_credit: LcRates::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenarioDefaults {
    pub tenors: Vec<u32>,
    pub rates: Vec<Rate>,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            tenors: DEFAULT_TENOR_SCENARIOS.to_vec(),
            rates: DEFAULT_RATE_SCENARIOS.to_vec(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.interest_convention, InterestConvention::SimpleAnnual);
        assert_eq!(config.scenarios.tenors, vec![3, 6, 9, 12]);
        assert_eq!(config.letter_of_credit, LcRates::default());
    }

    #[test]
    fn test_partial_overrides() {
        let config = CliConfig::parse(
            r#"
            log_level = "debug"
            interest_convention = "DayCount30360"

            [scenarios]
            tenors = [1, 2, 3]
            rates = ["0.1", "0.2"]

            [letter_of_credit]
            margin_rate_pct = "25"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.interest_convention, InterestConvention::DayCount30360);
        assert_eq!(config.scenarios.tenors, vec![1, 2, 3]);
        assert_eq!(config.scenarios.rates, vec![dec!(0.1), dec!(0.2)]);
        assert_eq!(config.letter_of_credit.margin_rate_pct, dec!(25));
        // untouched fields keep their defaults
        assert_eq!(config.letter_of_credit.lc_fee_rate_pct, dec!(0.15));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(CliConfig::parse("interest_convention = \"Actual365\"").is_err());
        assert!(CliConfig::parse("scenarios = 3").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = CliConfig::load(Path::new("definitely/not/here/factor.toml")).unwrap();
        assert_eq!(config.scenarios.rates.len(), 5);
    }
}
