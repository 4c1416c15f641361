use std::sync::Arc;

use matcher::{find_best_match, BestMatch, MatchConfig, MatchError, NoMatch};
use serde::Serialize;
use store::{EmbeddingRecord, FaceStore};
use tracing::{debug, info, warn};

use crate::{EmbeddingExtractor, ServiceError};

/// Result of a successful `train`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReceipt {
    pub person_id: String,
    /// Dimensionality of the stored descriptor.
    pub dimensions: usize,
    /// How many subjects the extractor found; only the first was stored.
    pub faces_detected: usize,
}

/// Orchestrates the extractor, the store and the matcher.
///
/// Multi-face policy: when the extractor reports several detections, the
/// first one it returned is used for both training and comparison. No
/// size- or confidence-based selection is attempted.
pub struct IdentityService {
    extractor: Arc<dyn EmbeddingExtractor>,
    store: Arc<FaceStore>,
    matching: MatchConfig,
}

impl IdentityService {
    pub fn new(
        extractor: Arc<dyn EmbeddingExtractor>,
        store: Arc<FaceStore>,
        matching: MatchConfig,
    ) -> Result<Self, MatchError> {
        matching.validate()?;
        Ok(Self {
            extractor,
            store,
            matching,
        })
    }

    pub fn threshold(&self) -> f32 {
        self.matching.threshold
    }

    /// Associate the first face found in `image` with `person_id`,
    /// replacing any earlier association.
    pub fn train(&self, image: &[u8], person_id: &str) -> Result<TrainReceipt, ServiceError> {
        if person_id.trim().is_empty() {
            return Err(ServiceError::InvalidPersonId);
        }

        let (descriptor, faces_detected) = self.first_descriptor(image)?;
        let record = self
            .store
            .save_face(person_id, descriptor)
            .map_err(ServiceError::PersistenceFailed)?;

        info!(person_id, faces_detected, "identity trained");
        Ok(TrainReceipt {
            person_id: record.person_id,
            dimensions: record.embedding.len(),
            faces_detected,
        })
    }

    /// Identify the first face found in `image` among trained identities.
    pub fn compare(&self, image: &[u8]) -> Result<BestMatch, ServiceError> {
        let (query, _) = self.first_descriptor(image)?;

        let candidates = self
            .store
            .get_all_faces()
            .map_err(ServiceError::PersistenceFailed)?;
        if candidates.is_empty() {
            return Err(ServiceError::NoTrainedIdentities);
        }

        match find_best_match(&query, &candidates, self.matching.threshold) {
            Ok(hit) => {
                info!(person_id = %hit.person_id, distance = hit.distance, "identity matched");
                Ok(hit)
            }
            Err(NoMatch::NoTrainedIdentities) => Err(ServiceError::NoTrainedIdentities),
            Err(NoMatch::BelowThreshold { nearest, distance }) => {
                info!(
                    nearest = %nearest,
                    distance,
                    threshold = self.matching.threshold,
                    "no identity within threshold"
                );
                Err(ServiceError::NoMatchFound {
                    best_distance: Some(distance),
                })
            }
            Err(NoMatch::NoComparableCandidates { mismatches }) => {
                warn!(
                    candidates = candidates.len(),
                    query_dimensions = query.len(),
                    "no stored embedding matches the query dimensionality"
                );
                Err(ServiceError::IncompatibleEmbeddings(mismatches))
            }
        }
    }

    /// Stored record for `person_id`, if trained.
    pub fn lookup(&self, person_id: &str) -> Result<Option<EmbeddingRecord>, ServiceError> {
        self.store
            .get_face_by_id(person_id)
            .map_err(ServiceError::PersistenceFailed)
    }

    /// Number of trained identities.
    pub fn identity_count(&self) -> Result<usize, ServiceError> {
        self.store.len().map_err(ServiceError::PersistenceFailed)
    }

    fn first_descriptor(&self, image: &[u8]) -> Result<(Vec<f32>, usize), ServiceError> {
        let detections = self.extractor.extract(image)?;
        let faces_detected = detections.len();
        let first = detections
            .into_iter()
            .next()
            .ok_or(ServiceError::NoFaceDetected)?;

        if first.descriptor.is_empty() || first.descriptor.iter().any(|v| !v.is_finite()) {
            return Err(ServiceError::InvalidImage(format!(
                "{} produced an unusable descriptor",
                self.extractor.name()
            )));
        }
        if faces_detected > 1 {
            debug!(faces_detected, "multiple faces detected, using the first");
        }
        Ok((first.descriptor, faces_detected))
    }
}
