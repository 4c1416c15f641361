//! JSON document backend.
//!
//! The whole mapping lives in one pretty-printed JSON object keyed by person
//! identifier:
//!
//! ```json
//! {
//!   "alice": {
//!     "person_id": "alice",
//!     "embedding": [0.12, -0.03],
//!     "created_at": 1700000000
//!   }
//! }
//! ```
//!
//! Writes go to a temporary file in the same directory which is fsynced and
//! then renamed over the target, so readers of the file only ever see the
//! previous or the next complete document.

use crate::{FaceMap, StoreBackend, StoreError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// Parse and validate a persisted document.
pub(crate) fn decode_document(bytes: &[u8]) -> Result<FaceMap, StoreError> {
    let faces: FaceMap =
        serde_json::from_slice(bytes).map_err(|e| StoreError::CorruptState(e.to_string()))?;

    for (key, record) in &faces {
        if key.trim().is_empty() {
            return Err(StoreError::CorruptState("blank person id key".into()));
        }
        if key != &record.person_id {
            return Err(StoreError::CorruptState(format!(
                "key '{key}' holds record for '{}'",
                record.person_id
            )));
        }
        if record.embedding.is_empty() {
            return Err(StoreError::CorruptState(format!(
                "record '{key}' has an empty embedding"
            )));
        }
    }

    Ok(faces)
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<FaceMap, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_document(&bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FaceMap::new()),
            Err(err) => Err(StoreError::io("reading store file", err)),
        }
    }

    fn persist(&self, faces: &FaceMap) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(faces)
            .map_err(|e| StoreError::io("encoding store document", io::Error::other(e)))?;

        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::io("creating store directory", e))?;

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| StoreError::io("creating temp file", e))?;
        tmp.write_all(&data)
            .map_err(|e| StoreError::io("writing temp file", e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io("syncing temp file", e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io("replacing store file", e.error))?;

        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
