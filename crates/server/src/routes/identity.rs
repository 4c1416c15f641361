use crate::error::{ServerError, ServerResult};
use crate::metrics::{record_compare, record_train};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use identity::ServiceError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Request to associate a face with a person
#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    /// Base64 image, optionally as a `data:<mime>;base64,` URL
    pub image: String,
    pub person_id: String,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub message: String,
    pub person_id: String,
}

/// Request to identify the face in an image
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub person_id: String,
    /// Squared Euclidean distance to the matched identity; lower is closer.
    pub similarity: f32,
}

#[derive(Debug, Serialize)]
pub struct FaceResponse {
    pub person_id: String,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
}

/// Decode the `image` field of a request body.
pub(crate) fn decode_image(encoded: &str) -> ServerResult<Vec<u8>> {
    let payload = match encoded.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, data)| data)
            .ok_or_else(|| ServerError::BadRequest("data URL must be base64 encoded".into()))?,
        None => encoded,
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ServerError::BadRequest(format!("image is not valid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(ServerError::BadRequest("image must not be empty".into()));
    }
    Ok(bytes)
}

fn outcome<T>(result: &Result<T, ServiceError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(err) => err.code(),
    }
}

/// Train a person (POST /train)
///
/// Extracts the first face in `image` and stores it under `person_id`,
/// replacing any earlier training for that person.
pub async fn train(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<TrainRequest>, JsonRejection>,
) -> ServerResult<Json<TrainResponse>> {
    let Json(request) = payload?;
    let image = decode_image(&request.image)?;

    let identity = state.identity.clone();
    let started = Instant::now();
    let result =
        tokio::task::spawn_blocking(move || identity.train(&image, &request.person_id)).await?;
    record_train(outcome(&result), started.elapsed());

    let receipt = result?;
    tracing::debug!(
        person_id = %receipt.person_id,
        dimensions = receipt.dimensions,
        "train request completed"
    );

    Ok(Json(TrainResponse {
        message: "Face trained successfully".to_string(),
        person_id: receipt.person_id,
    }))
}

/// Identify a face (POST /compare)
pub async fn compare(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> ServerResult<Json<CompareResponse>> {
    let Json(request) = payload?;
    let image = decode_image(&request.image)?;

    let identity = state.identity.clone();
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || identity.compare(&image)).await?;
    record_compare(outcome(&result), started.elapsed());

    let hit = result?;
    Ok(Json(CompareResponse {
        person_id: hit.person_id,
        similarity: hit.distance,
    }))
}

/// Look up a trained identity (GET /faces/{person_id})
pub async fn get_face(
    State(state): State<Arc<ServerState>>,
    Path(person_id): Path<String>,
) -> ServerResult<Json<FaceResponse>> {
    let record = state
        .identity
        .lookup(&person_id)?
        .ok_or(ServerError::NotFound)?;

    Ok(Json(FaceResponse {
        dimensions: record.dimensions(),
        person_id: record.person_id,
        created_at: record.created_at,
    }))
}
