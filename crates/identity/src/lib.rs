//! # Facemate Identity (`identity`)
//!
//! The train/compare use cases. [`IdentityService`] is the only component
//! that talks to the [`EmbeddingExtractor`]; it feeds descriptors into the
//! store on `train` and into the matcher on `compare`, and maps their
//! failures onto [`ServiceError`] so callers can tell "no face in photo"
//! from "no match" from "storage failure".
//!
//! The extractor is constructed once at startup and injected as a trait
//! object. With the default `thumbnail` feature, [`ThumbnailExtractor`] is
//! available as a deterministic reference implementation.
//!
//! ```
//! use std::sync::Arc;
//! use identity::{Detection, EmbeddingExtractor, ExtractError, IdentityService};
//! use matcher::MatchConfig;
//! use store::{BackendConfig, FaceStore};
//!
//! struct Fixed;
//!
//! impl EmbeddingExtractor for Fixed {
//!     fn extract(&self, _image: &[u8]) -> Result<Vec<Detection>, ExtractError> {
//!         Ok(vec![Detection::new(vec![0.25, 0.5])])
//!     }
//! }
//!
//! let store = Arc::new(FaceStore::open(&BackendConfig::in_memory()).unwrap());
//! let svc = IdentityService::new(Arc::new(Fixed), store, MatchConfig::default()).unwrap();
//!
//! svc.train(b"raw image bytes", "alice").unwrap();
//! let hit = svc.compare(b"another image").unwrap();
//! assert_eq!(hit.person_id, "alice");
//! assert_eq!(hit.distance, 0.0);
//! ```

mod error;
mod extractor;
mod service;
#[cfg(feature = "thumbnail")]
pub mod thumbnail;

pub use error::{ExtractError, ServiceError};
pub use extractor::{BoundingBox, Detection, EmbeddingExtractor};
pub use matcher::BestMatch;
pub use service::{IdentityService, TrainReceipt};
#[cfg(feature = "thumbnail")]
pub use thumbnail::ThumbnailExtractor;
