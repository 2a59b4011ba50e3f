//! Worker registry: the service layer between the store and its callers.
//!
//! The registry owns id assignment, blank templates and the lookup of
//! per-worker flags, and routes every calculation through the single
//! entitlement calculator.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::calculation::{calculate_entitlement, calculate_fleet};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    FleetSummary, NewWorker, Worker, WorkerConfig, WorkerEntitlement, WorkerStatus,
};
use crate::store::WorkerStore;

/// CRUD and calculation service over a [`WorkerStore`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use ferie_engine::config::ConfigLoader;
/// use ferie_engine::models::{NewWorker, Profile};
/// use ferie_engine::registry::WorkerRegistry;
/// use ferie_engine::store::MemoryStore;
///
/// let config = ConfigLoader::load("./config")?;
/// let registry = WorkerRegistry::new(Arc::new(MemoryStore::new()), Arc::new(config));
///
/// let worker = registry.create_worker(NewWorker {
///     first_name: "Mario".to_string(),
///     last_name: "Rossi".to_string(),
///     role: "Capotreno".to_string(),
///     grade: "C".to_string(),
///     profile: Profile::Rfi,
///     accent_color: None,
/// })?;
/// let entitlement = registry.entitlement(worker.id)?;
/// println!("Owed: {}", entitlement.totals.net_owed);
/// # Ok::<(), ferie_engine::error::EngineError>(())
/// ```
#[derive(Clone)]
pub struct WorkerRegistry {
    store: Arc<dyn WorkerStore>,
    config: Arc<ConfigLoader>,
}

impl WorkerRegistry {
    /// Creates a registry over a store and the engine configuration.
    pub fn new(store: Arc<dyn WorkerStore>, config: Arc<ConfigLoader>) -> Self {
        Self { store, config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Lists all workers ordered by id.
    pub fn list_workers(&self) -> EngineResult<Vec<Worker>> {
        let mut workers = self.store.load_workers()?;
        workers.sort_by_key(|worker| worker.id);
        Ok(workers)
    }

    /// Gets a worker by id.
    pub fn get_worker(&self, id: u64) -> EngineResult<Worker> {
        self.store
            .load_workers()?
            .into_iter()
            .find(|worker| worker.id == id)
            .ok_or(EngineError::WorkerNotFound { id })
    }

    /// Creates a worker with the next free id and a blank month template.
    ///
    /// The id is one more than the highest existing id, or 1 for an empty
    /// collection. Id assignment and insertion happen in one store update,
    /// so concurrent creations never share an id.
    pub fn create_worker(&self, new_worker: NewWorker) -> EngineResult<Worker> {
        let months = self.config.blank_months(new_worker.profile)?;

        let mut worker = Worker {
            id: 0,
            first_name: new_worker.first_name,
            last_name: new_worker.last_name,
            role: new_worker.role,
            grade: new_worker.grade,
            profile: new_worker.profile,
            accent_color: new_worker.accent_color,
            status: WorkerStatus::None,
            months,
        };

        self.store.update_document(&mut |document| {
            worker.id = next_worker_id(&document.workers);
            document.workers.push(worker.clone());
            Ok(())
        })?;

        info!(
            worker_id = worker.id,
            profile = %worker.profile,
            months = worker.months.len(),
            "Worker created"
        );
        Ok(worker)
    }

    /// Replaces the stored record of worker `id`.
    ///
    /// The record's own id must be `id` or zero (taken as `id`).
    pub fn replace_worker(&self, id: u64, mut worker: Worker) -> EngineResult<Worker> {
        if worker.id != 0 && worker.id != id {
            return Err(EngineError::InvalidWorker {
                field: "id".to_string(),
                message: format!("record id {} does not match {}", worker.id, id),
            });
        }
        worker.id = id;

        self.store.update_document(&mut |document| {
            let slot = document
                .workers
                .iter_mut()
                .find(|existing| existing.id == id)
                .ok_or(EngineError::WorkerNotFound { id })?;
            *slot = worker.clone();
            Ok(())
        })?;

        info!(worker_id = id, months = worker.months.len(), "Worker replaced");
        Ok(worker)
    }

    /// Deletes a worker and its stored flags.
    pub fn delete_worker(&self, id: u64) -> EngineResult<()> {
        let result = self.store.update_document(&mut |document| {
            let before = document.workers.len();
            document.workers.retain(|worker| worker.id != id);
            if document.workers.len() == before {
                return Err(EngineError::WorkerNotFound { id });
            }
            document.configs.remove(&id);
            Ok(())
        });

        if let Err(EngineError::WorkerNotFound { .. }) = &result {
            warn!(worker_id = id, "Delete requested for unknown worker");
        }
        result?;

        info!(worker_id = id, "Worker deleted");
        Ok(())
    }

    /// Returns the flags for a worker, falling back to the defaults.
    pub fn get_config(&self, id: u64) -> EngineResult<WorkerConfig> {
        Ok(self
            .store
            .load_config(id)?
            .unwrap_or_else(|| self.config.default_worker_config()))
    }

    /// Stores the flags for an existing worker.
    pub fn set_config(&self, id: u64, config: WorkerConfig) -> EngineResult<WorkerConfig> {
        self.store.update_document(&mut |document| {
            if !document.workers.iter().any(|worker| worker.id == id) {
                return Err(EngineError::WorkerNotFound { id });
            }
            document.configs.insert(id, config);
            Ok(())
        })?;

        info!(
            worker_id = id,
            include_tickets = config.include_tickets,
            include_ex_fest = config.include_ex_fest,
            start_claim_year = config.start_claim_year,
            "Worker config saved"
        );
        Ok(config)
    }

    /// Calculates the entitlement of one worker with its stored flags.
    pub fn entitlement(&self, id: u64) -> EngineResult<WorkerEntitlement> {
        let worker = self.get_worker(id)?;
        let config = self.get_config(id)?;
        Ok(calculate_entitlement(&worker, &config))
    }

    /// Calculates the fleet-wide dashboard figures.
    pub fn dashboard(&self) -> EngineResult<FleetSummary> {
        let workers = self.store.load_workers()?;
        let configs = workers
            .iter()
            .map(|worker| Ok((worker.id, self.get_config(worker.id)?)))
            .collect::<EngineResult<HashMap<u64, WorkerConfig>>>()?;

        Ok(calculate_fleet(&workers, &configs))
    }
}

/// `max(existing ids) + 1`, or 1 when there are no workers.
pub fn next_worker_id(workers: &[Worker]) -> u64 {
    workers
        .iter()
        .map(|worker| worker.id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthRecord, Profile};
    use crate::store::{JsonFileStore, MemoryStore};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn registry() -> WorkerRegistry {
        let config = ConfigLoader::load("./config").unwrap();
        WorkerRegistry::new(Arc::new(MemoryStore::new()), Arc::new(config))
    }

    fn new_worker(profile: Profile) -> NewWorker {
        NewWorker {
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            role: "Manovratore".to_string(),
            grade: "B".to_string(),
            profile,
            accent_color: None,
        }
    }

    #[test]
    fn test_next_worker_id() {
        assert_eq!(next_worker_id(&[]), 1);

        let registry = registry();
        registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        let workers = registry.list_workers().unwrap();
        assert_eq!(next_worker_id(&workers), 3);
    }

    #[test]
    fn test_create_assigns_max_plus_one_after_delete() {
        let registry = registry();
        let first = registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        let second = registry.create_worker(new_worker(Profile::Elior)).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        registry.delete_worker(1).unwrap();
        let third = registry.create_worker(new_worker(Profile::Rekeep)).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_create_builds_blank_template() {
        let registry = registry();
        let worker = registry.create_worker(new_worker(Profile::Rfi)).unwrap();

        let range = registry.config().settings().template;
        let years = range.years().count();
        assert_eq!(worker.months.len(), years * 12);
        assert!(worker.months[0].columns.contains_key("0152"));
        assert_eq!(worker.status, WorkerStatus::None);
    }

    #[test]
    fn test_create_with_unknown_profile_fails() {
        let registry = registry();
        let result = registry.create_worker(new_worker(Profile::Unknown));
        assert!(matches!(result, Err(EngineError::ProfileNotFound { .. })));
        assert!(registry.list_workers().unwrap().is_empty());
    }

    #[test]
    fn test_get_unknown_worker() {
        let registry = registry();
        assert!(matches!(
            registry.get_worker(99),
            Err(EngineError::WorkerNotFound { id: 99 })
        ));
    }

    #[test]
    fn test_replace_worker_keeps_path_id() {
        let registry = registry();
        let mut worker = registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        worker.id = 0;
        worker.last_name = "Rossini".to_string();

        let replaced = registry.replace_worker(1, worker).unwrap();
        assert_eq!(replaced.id, 1);
        assert_eq!(registry.get_worker(1).unwrap().last_name, "Rossini");
    }

    #[test]
    fn test_replace_worker_with_mismatched_id_fails() {
        let registry = registry();
        let mut worker = registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        worker.id = 7;

        assert!(matches!(
            registry.replace_worker(1, worker),
            Err(EngineError::InvalidWorker { .. })
        ));
    }

    #[test]
    fn test_delete_removes_config() {
        let registry = registry();
        let worker = registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        let config = WorkerConfig {
            include_tickets: false,
            ..WorkerConfig::default()
        };
        registry.set_config(worker.id, config).unwrap();

        registry.delete_worker(worker.id).unwrap();
        assert!(matches!(
            registry.delete_worker(worker.id),
            Err(EngineError::WorkerNotFound { .. })
        ));

        let again = registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        assert_eq!(again.id, 1);
        assert_eq!(registry.get_config(1).unwrap(), WorkerConfig::default());
    }

    #[test]
    fn test_set_config_for_unknown_worker_fails() {
        let registry = registry();
        assert!(matches!(
            registry.set_config(5, WorkerConfig::default()),
            Err(EngineError::WorkerNotFound { id: 5 })
        ));
    }

    #[test]
    fn test_entitlement_uses_stored_config() {
        let registry = registry();
        let mut worker = registry.create_worker(new_worker(Profile::Rfi)).unwrap();

        let mut reference = MonthRecord::blank(2010, 0).with_column("0152", json!(2000));
        reference.days_worked = Decimal::from(25);
        let mut claim = MonthRecord::blank(2011, 7);
        claim.days_vacation = Decimal::from(10);
        claim.coeff_ticket = Decimal::from(5);
        worker.months = vec![reference, claim];
        registry.replace_worker(worker.id, worker).unwrap();

        let with_tickets = registry.entitlement(1).unwrap();
        assert_eq!(with_tickets.totals.net_owed, Decimal::from(850));

        registry
            .set_config(
                1,
                WorkerConfig {
                    include_tickets: false,
                    ..WorkerConfig::default()
                },
            )
            .unwrap();
        let without_tickets = registry.entitlement(1).unwrap();
        assert_eq!(without_tickets.totals.net_owed, Decimal::from(800));
        assert_eq!(without_tickets.totals.potential_ticket, Decimal::from(50));
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ids() {
        let registry = registry();

        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| registry.create_worker(new_worker(Profile::Rfi)).unwrap());
            }
        });

        let ids: Vec<u64> = registry.list_workers().unwrap().iter().map(|w| w.id).collect();
        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
    }

    #[test]
    fn test_concurrent_creates_and_deletes_lose_nothing() {
        let registry = registry();
        for _ in 0..8 {
            registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        }

        std::thread::scope(|scope| {
            for id in 1..=4u64 {
                let registry = &registry;
                scope.spawn(move || registry.delete_worker(id).unwrap());
                scope.spawn(move || registry.create_worker(new_worker(Profile::Elior)).unwrap());
            }
        });

        let workers = registry.list_workers().unwrap();
        assert_eq!(workers.len(), 8);
        assert!(workers.iter().all(|worker| worker.id > 4));
        let mut ids: Vec<u64> = workers.iter().map(|w| w.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_concurrent_creates_on_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("workers.json")));
        let config = ConfigLoader::load("./config").unwrap();
        let registry = WorkerRegistry::new(store, Arc::new(config));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| registry.create_worker(new_worker(Profile::Rekeep)).unwrap());
            }
        });

        let ids: Vec<u64> = registry.list_workers().unwrap().iter().map(|w| w.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    }

    #[test]
    fn test_dashboard_covers_all_workers() {
        let registry = registry();
        registry.create_worker(new_worker(Profile::Rfi)).unwrap();
        registry.create_worker(new_worker(Profile::Elior)).unwrap();

        let summary = registry.dashboard().unwrap();
        assert_eq!(summary.worker_count, 2);
        assert_eq!(summary.totals.net_owed, Decimal::ZERO);
        assert_eq!(summary.status_counts.get("none"), Some(&2));
    }
}
