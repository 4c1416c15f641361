//! # Facemate Embedding Store
//!
//! A durable, concurrency-safe mapping from person identifier to the
//! embedding last trained for that person.
//!
//! ## Core Features
//!
//! - **Upsert semantics**: at most one [`EmbeddingRecord`] per identifier; a
//!   later [`FaceStore::save_face`] replaces the earlier record.
//! - **Reader/writer discipline**: lookups run concurrently, writes are
//!   exclusive with every other store operation. A write is persisted before
//!   it returns and before any reader can observe it.
//! - **Pluggable Backends**: persistence is abstracted behind
//!   [`StoreBackend`]. Out of the box there is a JSON document backend
//!   ([`JsonFileBackend`]) and an ephemeral [`InMemoryBackend`].
//! - **Snapshots**: [`FaceStore::get_all_faces`] returns owned copies, never
//!   a view into the live map.
//!
//! ## Example Usage
//!
//! ```
//! use store::{BackendConfig, FaceStore};
//!
//! let store = FaceStore::open(&BackendConfig::in_memory()).unwrap();
//! store.save_face("alice", vec![0.1, 0.2, 0.3]).unwrap();
//! store.save_face("alice", vec![0.3, 0.2, 0.1]).unwrap();
//!
//! let faces = store.get_all_faces().unwrap();
//! assert_eq!(faces.len(), 1);
//! assert_eq!(faces[0].embedding, vec![0.3, 0.2, 0.1]);
//! ```

mod backend;
mod error;
mod record;

pub use backend::{BackendConfig, InMemoryBackend, JsonFileBackend, StoreBackend};
pub use error::StoreError;
pub use record::EmbeddingRecord;

use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// The full person-to-record mapping, ordered by identifier.
pub type FaceMap = BTreeMap<String, EmbeddingRecord>;

/// Durable repository of [`EmbeddingRecord`]s.
pub struct FaceStore {
    backend: Box<dyn StoreBackend>,
    faces: RwLock<FaceMap>,
}

impl FaceStore {
    /// Build the configured backend and load whatever it has persisted.
    pub fn open(cfg: &BackendConfig) -> Result<Self, StoreError> {
        Self::with_backend(cfg.build())
    }

    /// Load from a custom backend. Useful for dependency injection in tests.
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Result<Self, StoreError> {
        let faces = backend.load()?;
        info!(
            backend = %backend.describe(),
            identities = faces.len(),
            "face store loaded"
        );
        Ok(Self {
            backend,
            faces: RwLock::new(faces),
        })
    }

    /// Insert or replace the record for `person_id`.
    ///
    /// The full mapping is persisted before the write lock is released. If
    /// persistence fails, the previous in-memory state is restored and the
    /// error is returned.
    pub fn save_face(
        &self,
        person_id: &str,
        embedding: Vec<f32>,
    ) -> Result<EmbeddingRecord, StoreError> {
        if person_id.trim().is_empty() {
            return Err(StoreError::InvalidRecord("person id must not be blank".into()));
        }
        if embedding.is_empty() {
            return Err(StoreError::InvalidRecord("embedding must not be empty".into()));
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(StoreError::InvalidRecord(
                "embedding must contain only finite values".into(),
            ));
        }

        let record = EmbeddingRecord::new(person_id, embedding);

        let mut faces = self.faces.write().map_err(|_| StoreError::LockPoisoned)?;
        let previous = faces.insert(person_id.to_string(), record.clone());

        if let Err(err) = self.backend.persist(&faces) {
            match previous {
                Some(prev) => {
                    faces.insert(person_id.to_string(), prev);
                }
                None => {
                    faces.remove(person_id);
                }
            }
            warn!(person_id, error = %err, "persisting face store failed, write rolled back");
            return Err(err);
        }

        debug!(
            person_id,
            dimensions = record.dimensions(),
            replaced = previous.is_some(),
            "face saved"
        );
        Ok(record)
    }

    /// Point-in-time copy of every stored record, ordered by person id.
    pub fn get_all_faces(&self) -> Result<Vec<EmbeddingRecord>, StoreError> {
        let faces = self.faces.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(faces.values().cloned().collect())
    }

    /// Copy of the record for `person_id`, if one exists.
    pub fn get_face_by_id(&self, person_id: &str) -> Result<Option<EmbeddingRecord>, StoreError> {
        let faces = self.faces.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(faces.get(person_id).cloned())
    }

    /// Number of trained identities.
    pub fn len(&self) -> Result<usize, StoreError> {
        let faces = self.faces.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(faces.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
