//! In-memory worker store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{Worker, WorkerConfig};

use super::{WorkerStore, WorkersDocument};

/// A [`WorkerStore`] that keeps everything in process memory.
///
/// # Example
///
/// ```
/// use ferie_engine::store::{MemoryStore, WorkerStore};
///
/// let store = MemoryStore::new();
/// assert!(store.load_workers().unwrap().is_empty());
/// assert!(store.load_config(1).unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<WorkersDocument>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with a document.
    pub fn with_document(document: WorkersDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, WorkersDocument>> {
        self.document.read().map_err(|_| EngineError::StoreError {
            message: "memory store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, WorkersDocument>> {
        self.document.write().map_err(|_| EngineError::StoreError {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl WorkerStore for MemoryStore {
    fn load_workers(&self) -> EngineResult<Vec<Worker>> {
        Ok(self.read()?.workers.clone())
    }

    fn load_config(&self, worker_id: u64) -> EngineResult<Option<WorkerConfig>> {
        Ok(self.read()?.configs.get(&worker_id).copied())
    }

    fn update_document(
        &self,
        change: &mut dyn FnMut(&mut WorkersDocument) -> EngineResult<()>,
    ) -> EngineResult<()> {
        let mut document = self.write()?;
        let mut draft = document.clone();
        change(&mut draft)?;
        *document = draft;
        Ok(())
    }
}
