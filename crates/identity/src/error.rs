use store::StoreError;
use thiserror::Error;

/// Errors returned by an [`crate::EmbeddingExtractor`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    /// The bytes are not an image the extractor can decode.
    #[error("unreadable image: {0}")]
    UnreadableImage(String),
    /// The extractor itself failed (model not loaded, inference error, ...).
    #[error("extractor failure: {0}")]
    Backend(String),
}

/// Errors seen by callers of [`crate::IdentityService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no face detected in the image")]
    NoFaceDetected,

    #[error("no trained faces available")]
    NoTrainedIdentities,

    /// The nearest identity was too far away. `best_distance` is the
    /// distance to it, when any candidate could be compared.
    #[error("no match found within threshold")]
    NoMatchFound { best_distance: Option<f32> },

    #[error("failed to persist identity: {0}")]
    PersistenceFailed(#[source] StoreError),

    #[error("stored embeddings are incompatible with the extractor output")]
    IncompatibleEmbeddings(Vec<StoreError>),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("person id must not be empty")]
    InvalidPersonId,
}

impl From<ExtractError> for ServiceError {
    fn from(err: ExtractError) -> Self {
        ServiceError::InvalidImage(err.to_string())
    }
}

impl ServiceError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NoFaceDetected => "NO_FACE_DETECTED",
            ServiceError::NoTrainedIdentities => "NO_TRAINED_IDENTITIES",
            ServiceError::NoMatchFound { .. } => "NO_MATCH_FOUND",
            ServiceError::PersistenceFailed(_) => "PERSISTENCE_FAILED",
            ServiceError::IncompatibleEmbeddings(_) => "INCOMPATIBLE_EMBEDDINGS",
            ServiceError::InvalidImage(_) => "INVALID_IMAGE",
            ServiceError::InvalidPersonId => "INVALID_PERSON_ID",
        }
    }

    /// True when the caller's input caused the error, false for server-side faults.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ServiceError::PersistenceFailed(_) | ServiceError::IncompatibleEmbeddings(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn extract_error_maps_to_invalid_image() {
        let err: ServiceError = ExtractError::UnreadableImage("truncated png".into()).into();
        assert!(matches!(&err, ServiceError::InvalidImage(msg) if msg.contains("truncated png")));
        assert_eq!(err.code(), "INVALID_IMAGE");
        assert!(err.is_client_error());
    }

    #[test]
    fn persistence_failure_is_server_side() {
        let err = ServiceError::PersistenceFailed(StoreError::Io {
            context: "writing".into(),
            source: io::Error::other("disk full"),
        });
        assert!(!err.is_client_error());
        assert_eq!(err.code(), "PERSISTENCE_FAILED");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn codes_distinguish_no_face_from_no_match() {
        assert_ne!(
            ServiceError::NoFaceDetected.code(),
            ServiceError::NoMatchFound {
                best_distance: Some(1.0)
            }
            .code()
        );
        assert_eq!(
            ServiceError::NoTrainedIdentities.to_string(),
            "no trained faces available"
        );
    }
}
