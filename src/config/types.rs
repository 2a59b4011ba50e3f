//! Configuration types for the Ferie Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// The range of years a new worker's blank template covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRange {
    /// First year, inclusive.
    pub first_year: i32,
    /// Last year, inclusive. The current calendar year when omitted.
    #[serde(default)]
    pub last_year: Option<i32>,
}

impl TemplateRange {
    /// The configured last year, or the current local year.
    pub fn resolved_last_year(&self) -> i32 {
        self.last_year.unwrap_or_else(|| Local::now().year())
    }

    /// Every year of the template, in order.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.resolved_last_year()
    }
}

/// Engine-wide settings from engine.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// First claim year for workers with no stored override.
    pub default_start_claim_year: i32,
    /// Years generated for new workers.
    pub template: TemplateRange,
}

/// A payslip line item counted as variable pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCode {
    /// The column key used in month records (e.g. "0152").
    pub code: String,
    /// Human-readable description of the line item.
    pub label: String,
}

/// The pay-code catalogue of one employer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// Employer name.
    pub name: String,
    /// Short description of the contract.
    pub description: String,
    /// Variable-pay columns, in display order.
    pub pay_codes: Vec<PayCode>,
}

/// Profiles configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesConfig {
    /// Map of profile tag to its definition.
    pub profiles: BTreeMap<String, ProfileDefinition>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    /// Keyed by upper-case profile tag.
    profiles: BTreeMap<String, ProfileDefinition>,
}

impl EngineConfig {
    /// Creates a new EngineConfig, normalizing profile tags to upper case.
    pub fn new(settings: EngineSettings, profiles: BTreeMap<String, ProfileDefinition>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|(tag, definition)| (tag.trim().to_uppercase(), definition))
            .collect();
        Self { settings, profiles }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all profile definitions keyed by tag.
    pub fn profiles(&self) -> &BTreeMap<String, ProfileDefinition> {
        &self.profiles
    }
}
