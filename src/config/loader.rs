//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthRecord, Profile, WorkerConfig};

use super::types::{EngineConfig, EngineSettings, ProfileDefinition, ProfilesConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── engine.yaml    # Default claim year and template range
/// └── profiles.yaml  # Pay-code columns per employer profile
/// ```
///
/// # Example
///
/// ```no_run
/// use ferie_engine::config::ConfigLoader;
/// use ferie_engine::models::Profile;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let rfi = loader.get_profile(Profile::Rfi).unwrap();
/// println!("RFI reports {} variable-pay codes", rfi.pay_codes.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing or contains invalid YAML, if
    /// the template range is inverted, or if a known profile has no
    /// definition in profiles.yaml.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;

        let last_year = settings.template.resolved_last_year();
        if settings.template.first_year > last_year {
            return Err(EngineError::ConfigParseError {
                path: engine_path.display().to_string(),
                message: format!(
                    "template first_year {} is after last_year {}",
                    settings.template.first_year, last_year
                ),
            });
        }

        let profiles_path = path.join("profiles.yaml");
        let profiles = Self::load_yaml::<ProfilesConfig>(&profiles_path)?;

        let config = EngineConfig::new(settings, profiles.profiles);
        if let Some(missing) = Profile::KNOWN
            .iter()
            .find(|profile| !config.profiles().contains_key(profile.tag()))
        {
            return Err(EngineError::ConfigParseError {
                path: profiles_path.display().to_string(),
                message: format!("no definition for profile {}", missing.tag()),
            });
        }

        Ok(Self::from_config(config))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
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

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns every profile definition keyed by tag.
    pub fn profiles(&self) -> &BTreeMap<String, ProfileDefinition> {
        self.config.profiles()
    }

    /// Gets the definition of a profile.
    ///
    /// Returns `ProfileNotFound` for [`Profile::Unknown`] or a profile
    /// missing from profiles.yaml.
    pub fn get_profile(&self, profile: Profile) -> EngineResult<&ProfileDefinition> {
        if !profile.is_known() {
            return Err(EngineError::ProfileNotFound {
                profile: profile.tag().to_string(),
            });
        }

        self.config
            .profiles()
            .get(profile.tag())
            .ok_or_else(|| EngineError::ProfileNotFound {
                profile: profile.tag().to_string(),
            })
    }

    /// The flags used for a worker with nothing stored.
    pub fn default_worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            start_claim_year: self.settings().default_start_claim_year,
            ..WorkerConfig::default()
        }
    }

    /// Builds the blank month template for a new worker.
    ///
    /// Twelve months for every year of the template range, each carrying
    /// every pay-code column of the profile as an empty string.
    pub fn blank_months(&self, profile: Profile) -> EngineResult<Vec<MonthRecord>> {
        let definition = self.get_profile(profile)?;
        let months = self
            .settings()
            .template
            .years()
            .flat_map(|year| (0..12).map(move |month_index| (year, month_index)))
            .map(|(year, month_index)| {
                definition
                    .pay_codes
                    .iter()
                    .fold(MonthRecord::blank(year, month_index), |record, pay_code| {
                        record.with_column(pay_code.code.clone(), Value::String(String::new()))
                    })
            })
            .collect();

        Ok(months)
    }
}
