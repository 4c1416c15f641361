//! Facemate Server - HTTP REST API for face identity training and matching
//!
//! Exposes the identity service over JSON:
//!
//! - **Training**: associate the face in a base64 image with a person id
//! - **Comparison**: find the trained person closest to a query face
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! Requests pass through compression, CORS, request-id and structured
//! logging middleware. Configuration comes from an optional `facemate`
//! config file and `FACEMATE__*` environment variables.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics
//! - `POST /train` - `{"image", "person_id"}` → `{"message", "person_id"}`
//! - `POST /compare` - `{"image"}` → `{"person_id", "similarity"}`
//! - `GET /faces/{person_id}` - Stored identity summary
//!
//! Errors use `{"error": {"code", "message", "details"?}}`.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ServerConfig, StoreBackendKind};
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
