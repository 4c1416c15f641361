use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single person-to-embedding association.
///
/// Records handed out by [`crate::FaceStore`] are owned copies; mutating one
/// never affects the stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Caller-supplied identifier, unique within a store.
    pub person_id: String,
    /// Descriptor produced by the embedding extractor.
    pub embedding: Vec<f32>,
    /// Time of the last write, persisted as unix seconds. Held at whole-second
    /// precision so a reloaded record equals the one that was written.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl EmbeddingRecord {
    pub fn new(person_id: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            person_id: person_id.into(),
            embedding,
            created_at: Utc::now().trunc_subsecs(0),
        }
    }

    /// Dimensionality of the stored descriptor.
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_serializes_as_unix_seconds() {
        let mut rec = EmbeddingRecord::new("bob", vec![0.5, -0.25]);
        rec.created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["created_at"], 1_700_000_000i64);
        assert_eq!(value["person_id"], "bob");

        let back: EmbeddingRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, rec);
        assert_eq!(back.dimensions(), 2);
    }

    #[test]
    fn fresh_record_survives_serialization_unchanged() {
        let rec = EmbeddingRecord::new("carol", vec![1.0]);
        assert_eq!(rec.created_at.timestamp_subsec_nanos(), 0);

        let back: EmbeddingRecord =
            serde_json::from_str(&serde_json::to_string(&rec).unwrap()).unwrap();
        assert_eq!(back, rec);
    }
}
