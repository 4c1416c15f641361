//! API route handlers
//!
//! - `health`: liveness, readiness and metrics
//! - `identity`: training, comparison and identity lookup

pub mod health;
pub mod identity;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service information (GET /)
///
/// ```json
/// {
///   "name": "facemate",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "facemate",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /train",
            "POST /compare",
            "GET /faces/{person_id}",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
