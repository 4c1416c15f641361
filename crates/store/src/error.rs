use std::io;
use thiserror::Error;

/// Errors surfaced by the embedding store and by distance computations over
/// stored embeddings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("store io failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    /// The persisted document could not be parsed back into a mapping.
    #[error("persisted store is corrupt: {0}")]
    CorruptState(String),
    /// Two embeddings of different dimensionality were compared.
    #[error("dimension mismatch for '{person_id}': expected {expected}, got {got}")]
    DimensionMismatch {
        person_id: String,
        expected: usize,
        got: usize,
    },
    /// A write was attempted with an empty identifier or embedding.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True when the error originated from the backing medium rather than
    /// from caller input.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_keeps_source() {
        let err = StoreError::io("writing faces.json", io::Error::other("disk full"));
        assert!(err.is_io());
        assert!(err.to_string().contains("writing faces.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn dimension_mismatch_message() {
        let err = StoreError::DimensionMismatch {
            person_id: "alice".into(),
            expected: 128,
            got: 64,
        };
        let msg = err.to_string();
        assert!(msg.contains("alice"));
        assert!(msg.contains("128"));
        assert!(msg.contains("64"));
        assert!(!err.is_io());
    }
}
