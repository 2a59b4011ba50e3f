//! Worker model and related types.
//!
//! This module defines the [`Worker`] record, the employer [`Profile`]
//! that selects its pay-code columns, and the presentational
//! [`WorkerStatus`] workflow tag.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::MonthRecord;
use super::lenient;

/// The employer/contract profile of a worker.
///
/// Each employer reports variable pay under different line items. Tags
/// other than the three known ones deserialize to [`Profile::Unknown`],
/// which contributes no variable pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
pub enum Profile {
    /// Rete Ferroviaria Italiana.
    #[default]
    #[serde(rename = "RFI")]
    Rfi,
    /// Elior on-board catering.
    #[serde(rename = "ELIOR")]
    Elior,
    /// Rekeep cleaning and facility services.
    #[serde(rename = "REKEEP")]
    Rekeep,
    /// Any tag not recognised by the engine.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Profile {
    /// All profiles the engine knows how to calculate.
    pub const KNOWN: [Profile; 3] = [Profile::Rfi, Profile::Elior, Profile::Rekeep];

    /// Maps a stored tag to a profile, ignoring case and surrounding spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferie_engine::models::Profile;
    ///
    /// assert_eq!(Profile::from_tag("rfi"), Profile::Rfi);
    /// assert_eq!(Profile::from_tag(" REKEEP "), Profile::Rekeep);
    /// assert_eq!(Profile::from_tag("TRENITALIA"), Profile::Unknown);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "RFI" => Profile::Rfi,
            "ELIOR" => Profile::Elior,
            "REKEEP" => Profile::Rekeep,
            _ => Profile::Unknown,
        }
    }

    /// The tag used in persisted documents and the profile catalogue.
    pub fn tag(&self) -> &'static str {
        match self {
            Profile::Rfi => "RFI",
            Profile::Elior => "ELIOR",
            Profile::Rekeep => "REKEEP",
            Profile::Unknown => "UNKNOWN",
        }
    }

    /// Returns true for profiles whose pay codes count as variable pay.
    pub fn is_known(&self) -> bool {
        !matches!(self, Profile::Unknown)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Profile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(tag) => Profile::from_tag(&tag),
            Value::Null => Profile::default(),
            _ => Profile::Unknown,
        })
    }
}

/// Workflow tag shown on the worker card. Never affects calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    /// No workflow stage yet.
    #[default]
    None,
    /// Under negotiation.
    Trattativa,
    /// Claim ready to send.
    Pronta,
    /// Claim sent.
    Inviata,
    /// Claim closed.
    Chiusa,
}

impl WorkerStatus {
    /// Maps a stored tag to a status; unrecognised tags become `None`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "trattativa" => WorkerStatus::Trattativa,
            "pronta" => WorkerStatus::Pronta,
            "inviata" => WorkerStatus::Inviata,
            "chiusa" => WorkerStatus::Chiusa,
            _ => WorkerStatus::None,
        }
    }
}

impl<'de> Deserialize<'de> for WorkerStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(tag) => WorkerStatus::from_tag(&tag),
            _ => WorkerStatus::None,
        })
    }
}

/// A tracked worker with their full payroll history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Unique identifier, assigned at creation.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    /// First name.
    #[serde(rename = "nome", default, deserialize_with = "lenient::text")]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "cognome", default, deserialize_with = "lenient::text")]
    pub last_name: String,
    /// Job title.
    #[serde(rename = "ruolo", default, deserialize_with = "lenient::text")]
    pub role: String,
    /// Free-text professional grade.
    #[serde(rename = "livello", default, deserialize_with = "lenient::text")]
    pub grade: String,
    /// Employer profile selecting the pay-code columns.
    #[serde(rename = "profilo", default)]
    pub profile: Profile,
    /// Card accent colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    /// Workflow tag.
    #[serde(default)]
    pub status: WorkerStatus,
    /// Monthly payroll records, in any order.
    #[serde(rename = "anni", default, deserialize_with = "lenient::records")]
    pub months: Vec<MonthRecord>,
}

impl Worker {
    /// Returns "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// The identity fields supplied when creating a worker.
///
/// The id and the blank month template are assigned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorker {
    /// First name.
    #[serde(rename = "nome", default)]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "cognome", default)]
    pub last_name: String,
    /// Job title.
    #[serde(rename = "ruolo", default)]
    pub role: String,
    /// Free-text professional grade.
    #[serde(rename = "livello", default)]
    pub grade: String,
    /// Employer profile.
    #[serde(rename = "profilo", default)]
    pub profile: Profile,
    /// Card accent colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}
