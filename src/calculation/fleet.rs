//! Fleet-wide aggregation for the dashboard.
//!
//! Each worker's entitlement is independent of every other worker's, so
//! the per-worker work runs on the rayon pool and is summed afterwards.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use tracing::info;

use crate::models::{EntitlementTotals, FleetSummary, Worker, WorkerConfig, WorkerEntitlement};

use super::entitlement::calculate_entitlement;

/// Calculates every worker's entitlement and the fleet totals.
///
/// Workers without an entry in `configs` use [`WorkerConfig::default`].
/// Results are ordered by worker id.
pub fn calculate_fleet(workers: &[Worker], configs: &HashMap<u64, WorkerConfig>) -> FleetSummary {
    let mut results: Vec<WorkerEntitlement> = workers
        .par_iter()
        .map(|worker| {
            let config = configs.get(&worker.id).copied().unwrap_or_default();
            calculate_entitlement(worker, &config)
        })
        .collect();
    results.sort_by_key(|result| result.worker_id);

    let totals: EntitlementTotals = results.iter().map(|result| result.totals).sum();

    let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
    for worker in workers {
        *status_counts
            .entry(FleetSummary::status_key(worker.status))
            .or_default() += 1;
    }

    let summary = FleetSummary {
        worker_count: results.len(),
        status_counts,
        totals,
        workers: results,
    };

    info!(
        workers = summary.worker_count,
        net_owed = %summary.totals.net_owed,
        potential_ticket = %summary.totals.potential_ticket,
        "Fleet entitlement aggregated"
    );

    summary
}
