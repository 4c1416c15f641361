use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use identity::{IdentityService, ThumbnailExtractor};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use store::FaceStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Identity service (shared across requests)
    pub identity: Arc<IdentityService>,

    /// Prometheus handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Open the configured store and wire the reference extractor.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = Arc::new(FaceStore::open(&config.backend_config())?);
        let identity = IdentityService::new(
            Arc::new(ThumbnailExtractor::default()),
            store,
            config.match_config(),
        )?;
        Self::with_service(config, Arc::new(identity))
    }

    /// Build state around an already constructed service.
    pub fn with_service(config: ServerConfig, identity: Arc<IdentityService>) -> ServerResult<Self> {
        let metrics = if config.metrics_enabled {
            let handle = crate::metrics::install()
                .map_err(|e| ServerError::Config(format!("metrics recorder: {e}")))?;
            Some(handle)
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            identity,
            metrics,
        })
    }
}
