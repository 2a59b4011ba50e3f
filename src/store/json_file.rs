//! Worker store backed by a single JSON document on disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Worker, WorkerConfig};

use super::{WorkerStore, WorkersDocument};

/// A [`WorkerStore`] persisting the whole [`WorkersDocument`] to one file.
///
/// Every write rewrites the document through a temporary file in the same
/// directory, persisted over the target. A failed write leaves neither a
/// partial document nor a stray temporary file. A missing file reads as an
/// empty document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store for the given document path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            guard: Mutex::new(()),
        }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> EngineResult<WorkersDocument> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Worker document missing, starting empty");
            return Ok(WorkersDocument::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(WorkersDocument::default());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn write_document(&self, document: &WorkersDocument) -> EngineResult<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let content = serde_json::to_string_pretty(document)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        info!(
            path = %self.path.display(),
            workers = document.workers.len(),
            "Worker document saved"
        );
        Ok(())
    }

    fn snapshot(&self) -> EngineResult<WorkersDocument> {
        let _lock = self.guard.lock().map_err(|_| EngineError::StoreError {
            message: "file store lock poisoned".to_string(),
        })?;
        self.read_document()
    }
}

impl WorkerStore for JsonFileStore {
    fn load_workers(&self) -> EngineResult<Vec<Worker>> {
        Ok(self.snapshot()?.workers)
    }

    fn load_config(&self, worker_id: u64) -> EngineResult<Option<WorkerConfig>> {
        Ok(self.snapshot()?.configs.get(&worker_id).copied())
    }

    fn update_document(
        &self,
        change: &mut dyn FnMut(&mut WorkersDocument) -> EngineResult<()>,
    ) -> EngineResult<()> {
        let _lock = self.guard.lock().map_err(|_| EngineError::StoreError {
            message: "file store lock poisoned".to_string(),
        })?;
        let mut document = self.read_document()?;
        change(&mut document)?;
        self.write_document(&document)
    }
}
