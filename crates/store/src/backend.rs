use crate::{FaceMap, StoreError};
use std::path::PathBuf;
use std::sync::RwLock;

/// Durable medium behind a [`crate::FaceStore`].
///
/// The store always hands the backend the complete mapping; backends never
/// see partial updates. Implementations must make `persist` all-or-nothing.
pub trait StoreBackend: Send + Sync {
    /// Load the persisted mapping. A medium with nothing written yet yields
    /// an empty map.
    fn load(&self) -> Result<FaceMap, StoreError>;
    /// Replace the persisted mapping with `faces`.
    fn persist(&self, faces: &FaceMap) -> Result<(), StoreError>;
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Configuration for selecting and building a backend.
///
/// # Example
/// ```
/// use store::BackendConfig;
///
/// let ephemeral = BackendConfig::in_memory();
/// let durable = BackendConfig::json_file("data/faces.json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendConfig {
    /// Pretty-printed JSON document at `path`, rewritten atomically on every write.
    JsonFile { path: PathBuf },
    /// Nothing survives the process. Useful for tests and dry runs.
    InMemory,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::json_file("data/faces.json")
    }
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn json_file<P: Into<PathBuf>>(path: P) -> Self {
        BackendConfig::JsonFile { path: path.into() }
    }

    /// Build the backend described by this configuration.
    pub fn build(&self) -> Box<dyn StoreBackend> {
        match self {
            BackendConfig::JsonFile { path } => Box::new(JsonFileBackend::new(path.clone())),
            BackendConfig::InMemory => Box::new(InMemoryBackend::new()),
        }
    }
}

/// Keeps the last persisted mapping in memory.
pub struct InMemoryBackend {
    persisted: RwLock<FaceMap>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            persisted: RwLock::new(FaceMap::new()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for InMemoryBackend {
    fn load(&self) -> Result<FaceMap, StoreError> {
        let guard = self
            .persisted
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    fn persist(&self, faces: &FaceMap) -> Result<(), StoreError> {
        let mut guard = self
            .persisted
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        *guard = faces.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

mod json_file;

pub use json_file::JsonFileBackend;
