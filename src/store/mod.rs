//! Persistence for workers and their calculation flags.
//!
//! The [`WorkerStore`] trait is the only way the rest of the engine reads
//! or writes persisted data. Flags are stored separately from worker
//! records and keyed by worker id.

mod json_file;
mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Worker, WorkerConfig};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage backend for the worker collection and per-worker flags.
pub trait WorkerStore: Send + Sync {
    /// Loads every stored worker.
    fn load_workers(&self) -> EngineResult<Vec<Worker>>;

    /// Loads the flags stored for a worker, if any.
    fn load_config(&self, worker_id: u64) -> EngineResult<Option<WorkerConfig>>;

    /// Runs a read-modify-write cycle on the whole document while holding
    /// the store's write lock.
    ///
    /// Nothing is persisted when `change` returns an error.
    fn update_document(
        &self,
        change: &mut dyn FnMut(&mut WorkersDocument) -> EngineResult<()>,
    ) -> EngineResult<()>;

    /// Replaces the stored worker collection.
    fn save_workers(&self, workers: &[Worker]) -> EngineResult<()> {
        self.update_document(&mut |document| {
            document.workers = workers.to_vec();
            Ok(())
        })
    }

    /// Stores the flags for a worker.
    fn save_config(&self, worker_id: u64, config: WorkerConfig) -> EngineResult<()> {
        self.update_document(&mut |document| {
            document.configs.insert(worker_id, config);
            Ok(())
        })
    }

    /// Removes the flags stored for a worker. Missing entries are ignored.
    fn delete_config(&self, worker_id: u64) -> EngineResult<()> {
        self.update_document(&mut |document| {
            document.configs.remove(&worker_id);
            Ok(())
        })
    }
}

/// The whole persisted state as a single JSON document.
///
/// This is also the import/export shape of the worker collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkersDocument {
    /// All workers.
    #[serde(default, deserialize_with = "crate::models::lenient::workers")]
    pub workers: Vec<Worker>,
    /// Flags keyed by worker id.
    #[serde(default)]
    pub configs: BTreeMap<u64, WorkerConfig>,
}
