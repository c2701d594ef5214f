//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the valuation
//! policy, passenger profiles and SIFL rate periods from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::RatePeriod;
use crate::reference::{PassengerProfileRegistry, RatePeriodTable, ReferenceData};

use super::types::{ProfilesConfig, ValuationPolicy};

/// Loads and provides access to SIFL reference data.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/sifl/
/// ├── valuation.yaml   # Multipliers, tier thresholds, seating proxy
/// ├── profiles.yaml    # Passenger tax profiles
/// └── rates/
///     └── 2024-h2.yaml # One rate period per file
/// ```
///
/// # Example
///
/// ```no_run
/// use sifl_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/sifl")?;
/// let reference = loader.reference_data();
///
/// let period = reference.rates().resolve(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
/// println!("Terminal charge: ${}", period.terminal_charge);
/// # Ok::<(), sifl_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    reference: ReferenceData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/sifl")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing, or the rates directory has no rate files
    /// - Any file contains invalid YAML
    /// - The policy or a rate period fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<ValuationPolicy>(&path.join("valuation.yaml"))?;
        policy.validate()?;

        let profiles = Self::load_yaml::<ProfilesConfig>(&path.join("profiles.yaml"))?;
        let periods = Self::load_rates(&path.join("rates"))?;

        let rates = RatePeriodTable::new(periods)?;
        let registry = PassengerProfileRegistry::new(profiles.profiles);

        info!(
            path = %path.display(),
            rate_periods = rates.periods().len(),
            profiles = registry.profiles().len(),
            "Loaded SIFL configuration"
        );

        Ok(Self {
            reference: ReferenceData::new(rates, registry, policy),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate period files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RatePeriod>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut periods = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let period = Self::load_yaml::<RatePeriod>(&path)?;
                debug!(
                    file = %path.display(),
                    start = %period.start_date,
                    end = %period.end_date,
                    "Loaded rate period"
                );
                periods.push(period);
            }
        }

        if periods.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(periods)
    }

    /// Returns the loaded reference data snapshot.
    pub fn reference_data(&self) -> ReferenceData {
        self.reference.clone()
    }

    /// Returns the loaded valuation policy.
    pub fn policy(&self) -> &ValuationPolicy {
        self.reference.policy()
    }

    /// Returns the loaded rate table.
    pub fn rates(&self) -> &RatePeriodTable {
        self.reference.rates()
    }

    /// Returns the loaded profile registry.
    pub fn profiles(&self) -> &PassengerProfileRegistry {
        self.reference.profiles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaxDesignation;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/sifl"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.rates().periods().len(), 3);
        assert_eq!(loader.profiles().profiles().len(), 4);
    }

    #[test]
    fn test_rate_periods_loaded_in_date_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let starts: Vec<NaiveDate> = loader
            .rates()
            .periods()
            .iter()
            .map(|p| p.start_date)
            .collect();
        assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 7, 1), date(2025, 7, 1)]);
    }

    #[test]
    fn test_rate_values_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let period = loader.rates().resolve(date(2024, 7, 20));
        assert_eq!(period.terminal_charge, dec("55.10"));
        assert_eq!(period.rates.short, dec("0.3015"));
        assert_eq!(period.rates.medium, dec("0.2300"));
        assert_eq!(period.rates.long, dec("0.2210"));
    }

    #[test]
    fn test_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.policy(), &ValuationPolicy::default());
    }

    #[test]
    fn test_profiles_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let profiles = loader.profiles();
        assert_eq!(profiles.lookup_by_name("Executive A"), TaxDesignation::Ceo);
        assert_eq!(profiles.lookup_by_name("Executive B"), TaxDesignation::Band7);
        assert_eq!(profiles.lookup_by_name("Director D"), TaxDesignation::Standard);
        assert_eq!(
            profiles.get("tp1").and_then(|p| p.employee_number.as_deref()),
            Some("T-8842")
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("valuation.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_data_snapshots_share_data() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.reference_data().ptr_eq(&loader.reference_data()));
    }
}
