//! Resume-state persistence
//!
//! One serialized removal job under a fixed location, surviving reloads
//! and restarts. Single writer (the coordinator, once per page) and a
//! single reader at startup, so there is no concurrency control.

/// File storage backend
pub mod file;
/// In-memory backend for tests and dry runs
pub mod memory;

use tracing::info;

use crate::config::StorageConfig;
use crate::core::RemovalJob;
use crate::utils::error::{Result, SweepError};

use file::FileStore;
use memory::MemoryStore;

/// Default file name of the resume document
pub const RESUME_FILE: &str = "resume.json";

/// Resume store with backend dispatch
#[derive(Debug, Clone)]
pub enum ResumeStore {
    /// Durable JSON document on disk
    File(FileStore),
    /// Volatile in-process slot
    Memory(MemoryStore),
}

impl ResumeStore {
    /// Create a store from configuration
    pub fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing resume store: {}", config.backend);

        match config.backend.as_str() {
            "file" => Ok(ResumeStore::File(FileStore::new(&config.path))),
            "memory" => Ok(ResumeStore::memory()),
            other => Err(SweepError::Config(format!(
                "Unsupported storage backend: {}",
                other
            ))),
        }
    }

    /// An in-memory store
    pub fn memory() -> Self {
        ResumeStore::Memory(MemoryStore::new())
    }

    /// Load the persisted job, if any
    pub async fn get(&self) -> Result<Option<RemovalJob>> {
        match self {
            ResumeStore::File(store) => store.get().await,
            ResumeStore::Memory(store) => store.get().await,
        }
    }

    /// Persist the job, replacing any previous record
    pub async fn put(&self, job: &RemovalJob) -> Result<()> {
        match self {
            ResumeStore::File(store) => store.put(job).await,
            ResumeStore::Memory(store) => store.put(job).await,
        }
    }

    /// Remove any persisted record
    pub async fn clear(&self) -> Result<()> {
        match self {
            ResumeStore::File(store) => store.clear().await,
            ResumeStore::Memory(store) => store.clear().await,
        }
    }
}
