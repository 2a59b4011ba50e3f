//! Per-worker calculation flags.
//!
//! Flags are persisted separately from the worker record and read with a
//! "missing key means default" rule, so an absent key and an explicitly
//! stored default are the same thing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::{flag_from_value, integer_from_value};

/// Annual vacation-day ceiling without ex-festività.
pub const STANDARD_VACATION_CEILING: u32 = 28;

/// Annual vacation-day ceiling including the ex-festività days.
pub const EX_FESTIVITA_VACATION_CEILING: u32 = 32;

/// First year included in a claim unless configured otherwise.
pub const DEFAULT_START_CLAIM_YEAR: i32 = 2008;

/// Calculation flags for one worker.
///
/// # Example
///
/// ```
/// use ferie_engine::models::WorkerConfig;
///
/// let config: WorkerConfig = serde_json::from_str(r#"{ "includeExFest": true }"#).unwrap();
/// assert!(config.include_tickets);
/// assert_eq!(config.start_claim_year, 2008);
/// assert_eq!(config.vacation_ceiling(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredWorkerConfig")]
pub struct WorkerConfig {
    /// Whether meal-ticket value is folded into the net amount owed.
    pub include_tickets: bool,
    /// Whether the ceiling is 32 days instead of 28.
    pub include_ex_fest: bool,
    /// Years before this one are excluded from the claim.
    pub start_claim_year: i32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            include_tickets: true,
            include_ex_fest: false,
            start_claim_year: DEFAULT_START_CLAIM_YEAR,
        }
    }
}

impl WorkerConfig {
    /// The annual vacation-day ceiling these flags select.
    pub fn vacation_ceiling(&self) -> u32 {
        if self.include_ex_fest {
            EX_FESTIVITA_VACATION_CEILING
        } else {
            STANDARD_VACATION_CEILING
        }
    }

    /// The ceiling as a decimal day count.
    pub fn vacation_ceiling_days(&self) -> Decimal {
        Decimal::from(self.vacation_ceiling())
    }
}

/// Raw stored form; values may be strings, numbers, `null` or absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkerConfig {
    #[serde(default)]
    include_tickets: Value,
    #[serde(default)]
    include_ex_fest: Value,
    #[serde(default)]
    start_claim_year: Value,
}

impl From<StoredWorkerConfig> for WorkerConfig {
    fn from(stored: StoredWorkerConfig) -> Self {
        let defaults = WorkerConfig::default();
        WorkerConfig {
            include_tickets: flag_from_value(&stored.include_tickets)
                .unwrap_or(defaults.include_tickets),
            include_ex_fest: flag_from_value(&stored.include_ex_fest)
                .unwrap_or(defaults.include_ex_fest),
            start_claim_year: integer_from_value(&stored.start_claim_year)
                .and_then(|year| i32::try_from(year).ok())
                .unwrap_or(defaults.start_claim_year),
        }
    }
}
