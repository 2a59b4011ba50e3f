//! Request types for the Ferie Engine API.
//!
//! Calculation endpoints accept the worker document shape directly, so a
//! worker exported from the store can be posted as-is.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Worker, WorkerConfig};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The worker with their month records.
    pub worker: Worker,
    /// Calculation flags; defaults apply when absent.
    #[serde(default)]
    pub config: Option<WorkerConfig>,
}

/// Request body for the `/fleet` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetRequest {
    /// All workers to aggregate.
    #[serde(default, deserialize_with = "crate::models::lenient::workers")]
    pub workers: Vec<Worker>,
    /// Flags keyed by worker id; workers without an entry use defaults.
    #[serde(default)]
    pub configs: HashMap<u64, WorkerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_request_without_config() {
        let json = r#"{ "worker": { "id": 1, "profilo": "RFI", "anni": [] } }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.worker.id, 1);
        assert!(request.config.is_none());
    }

    #[test]
    fn test_calculation_request_with_partial_config() {
        let json = r#"{
            "worker": { "id": 1 },
            "config": { "includeExFest": true }
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let config = request.config.unwrap();
        assert!(config.include_ex_fest);
        assert!(config.include_tickets);
    }

    #[test]
    fn test_fleet_request_string_keys() {
        let json = r#"{
            "workers": [ { "id": 1 }, { "id": 2 } ],
            "configs": { "2": { "includeTickets": false } }
        }"#;
        let request: FleetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.workers.len(), 2);
        assert!(!request.configs[&2].include_tickets);
    }
}
