use serde::{Deserialize, Serialize};

use crate::ExtractError;

/// Pixel-space rectangle around a detected subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One detected subject and its descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub descriptor: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl Detection {
    pub fn new(descriptor: Vec<f32>) -> Self {
        Self {
            descriptor,
            bounds: None,
        }
    }
}

/// Turns decoded image bytes into zero or more fixed-length descriptors.
///
/// Returning an empty vector means "nothing identifiable in this image" and
/// is not an error. `Err` is reserved for input the extractor cannot read.
/// Detections are returned in the extractor's own order; callers treat the
/// first one as authoritative.
pub trait EmbeddingExtractor: Send + Sync {
    fn extract(&self, image: &[u8]) -> Result<Vec<Detection>, ExtractError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "extractor"
    }
}
