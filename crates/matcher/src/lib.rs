//! # Facemate Matcher (`matcher`)
//!
//! Stateless nearest-neighbor search over a snapshot of stored embeddings.
//!
//! The matcher never reads the store itself: callers take a snapshot with
//! `FaceStore::get_all_faces` and pass it in, so any number of requests can
//! match concurrently without sharing mutable state.
//!
//! ## Metric
//!
//! Squared Euclidean distance, smaller is more similar. The default
//! threshold of [`DEFAULT_THRESHOLD`] matches the descriptor space of the
//! deployed face extractor; swapping extractors may require recalibrating it.
//!
//! ## Example
//!
//! ```
//! use matcher::{find_best_match, NoMatch};
//! use store::EmbeddingRecord;
//!
//! let candidates = vec![
//!     EmbeddingRecord::new("A", vec![0.0, 0.0]),
//!     EmbeddingRecord::new("B", vec![1.0, 1.0]),
//! ];
//!
//! let hit = find_best_match(&[0.1, 0.1], &candidates, 1.0).unwrap();
//! assert_eq!(hit.person_id, "A");
//!
//! let miss = find_best_match(&[10.0, 10.0], &candidates, 1.0).unwrap_err();
//! assert!(matches!(miss, NoMatch::BelowThreshold { .. }));
//! ```

pub mod engine;
pub mod types;

pub use crate::engine::{distance_to, find_best_match, squared_euclidean};
pub use crate::types::{BestMatch, MatchConfig, MatchError, NoMatch, DEFAULT_THRESHOLD};
