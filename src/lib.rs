//! Workspace umbrella crate for facemate.
//!
//! Re-exports the store, matcher and identity crates so library callers can
//! depend on a single package. The HTTP surface lives in `facemate-server`.
//!
//! ```
//! use std::sync::Arc;
//! use facemate::{BackendConfig, Detection, EmbeddingExtractor, ExtractError, FaceStore};
//! use facemate::{IdentityService, MatchConfig};
//!
//! struct Echo;
//!
//! impl EmbeddingExtractor for Echo {
//!     fn extract(&self, image: &[u8]) -> Result<Vec<Detection>, ExtractError> {
//!         Ok(vec![Detection::new(image.iter().map(|b| *b as f32).collect())])
//!     }
//! }
//!
//! let store = Arc::new(FaceStore::open(&BackendConfig::in_memory()).unwrap());
//! let svc = IdentityService::new(Arc::new(Echo), store, MatchConfig::default()).unwrap();
//! svc.train(&[1, 2, 3], "alice").unwrap();
//! assert_eq!(svc.compare(&[1, 2, 3]).unwrap().person_id, "alice");
//! ```

pub use identity::{
    BoundingBox, Detection, EmbeddingExtractor, ExtractError, IdentityService, ServiceError,
    TrainReceipt,
};
#[cfg(feature = "thumbnail")]
pub use identity::ThumbnailExtractor;
pub use matcher::{
    find_best_match, squared_euclidean, BestMatch, MatchConfig, MatchError, NoMatch,
    DEFAULT_THRESHOLD,
};
pub use store::{BackendConfig, EmbeddingRecord, FaceStore, StoreBackend, StoreError};

