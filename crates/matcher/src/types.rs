use serde::{Deserialize, Serialize};
use store::StoreError;
use thiserror::Error;

/// Squared-Euclidean threshold used when no other is configured. Calibrated
/// for 128-dimension face descriptors; a different extractor may need a
/// different value.
pub const DEFAULT_THRESHOLD: f32 = 0.6;

/// Configuration for a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Largest squared distance still accepted as the same identity.
    #[serde(default = "MatchConfig::default_threshold")]
    pub threshold: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl MatchConfig {
    pub(crate) fn default_threshold() -> f32 {
        DEFAULT_THRESHOLD
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(MatchError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Errors from match configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f32),
}

/// The accepted nearest candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMatch {
    pub person_id: String,
    /// Squared Euclidean distance to the query; smaller is more similar.
    pub distance: f32,
}

/// Why no candidate was accepted.
#[derive(Debug)]
pub enum NoMatch {
    /// The candidate set was empty.
    NoTrainedIdentities,
    /// The nearest candidate was farther than the threshold. The nearest
    /// identity and its distance are reported for diagnostics.
    BelowThreshold { nearest: String, distance: f32 },
    /// Every candidate had a different dimensionality than the query.
    NoComparableCandidates { mismatches: Vec<StoreError> },
}

impl NoMatch {
    /// Best distance observed, if any candidate could be compared.
    pub fn best_distance(&self) -> Option<f32> {
        match self {
            NoMatch::BelowThreshold { distance, .. } => Some(*distance),
            NoMatch::NoTrainedIdentities | NoMatch::NoComparableCandidates { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_point_six() {
        assert_eq!(MatchConfig::default().threshold, 0.6);
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_thresholds() {
        for bad in [-0.1, f32::NAN, f32::INFINITY] {
            assert!(MatchConfig::with_threshold(bad).validate().is_err());
        }
        assert!(MatchConfig::with_threshold(0.0).validate().is_ok());
    }

    #[test]
    fn threshold_defaults_when_missing_from_config() {
        let cfg: MatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, MatchConfig::default());
    }

    #[test]
    fn best_distance_only_for_threshold_rejections() {
        let rejected = NoMatch::BelowThreshold {
            nearest: "a".into(),
            distance: 2.5,
        };
        assert_eq!(rejected.best_distance(), Some(2.5));
        assert_eq!(NoMatch::NoTrainedIdentities.best_distance(), None);
    }
}
