use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use identity::ServiceError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Request timeout")]
    Timeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Identity(#[from] ServiceError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Identity(err) => match err {
                ServiceError::InvalidImage(_) | ServiceError::InvalidPersonId => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::NoFaceDetected => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::NoTrainedIdentities | ServiceError::NoMatchFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                ServiceError::PersistenceFailed(_) | ServiceError::IncompatibleEmbeddings(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Timeout => "REQUEST_TIMEOUT",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServerError::Identity(err) => err.code(),
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    /// Message shown to the client. Server-side failures are summarized so
    /// paths and source errors stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ServerError::Identity(ServiceError::PersistenceFailed(_)) => {
                "failed to persist identity".to_string()
            }
            ServerError::Internal(_) | ServerError::Config(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServerError::Identity(ServiceError::NoMatchFound {
                best_distance: Some(distance),
            }) => Some(json!({ "best_distance": distance })),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.public_message(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("worker task failed: {err}"))
    }
}

impl From<store::StoreError> for ServerError {
    fn from(err: store::StoreError) -> Self {
        ServerError::Internal(format!("store unavailable: {err}"))
    }
}

impl From<matcher::MatchError> for ServerError {
    fn from(err: matcher::MatchError) -> Self {
        ServerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use store::StoreError;

    async fn body_of(err: ServerError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::NoFaceDetected, StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::NoTrainedIdentities, StatusCode::NOT_FOUND),
            (ServiceError::InvalidPersonId, StatusCode::BAD_REQUEST),
            (ServiceError::InvalidImage("x".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::IncompatibleEmbeddings(Vec::new()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status_code(), status);
        }
    }

    #[tokio::test]
    async fn test_no_match_carries_best_distance() {
        let (status, body) = body_of(ServerError::Identity(ServiceError::NoMatchFound {
            best_distance: Some(1.5),
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NO_MATCH_FOUND");
        assert_eq!(body["error"]["details"]["best_distance"], 1.5);
    }

    #[tokio::test]
    async fn test_timeout_uses_standard_body() {
        let (status, body) = body_of(ServerError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["error"]["code"], "REQUEST_TIMEOUT");
        assert_eq!(body["error"]["message"], "Request timeout");
    }

    #[tokio::test]
    async fn test_persistence_failure_hides_source() {
        let err = ServiceError::PersistenceFailed(StoreError::CorruptState(
            "/var/lib/facemate/faces.json".into(),
        ));
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "PERSISTENCE_FAILED");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("faces.json"));
        assert!(body["error"].get("details").is_none());
    }
}
