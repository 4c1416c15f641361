//! Prometheus metrics for the identity endpoints.
//!
//! The recorder is process-global, so it is installed at most once and the
//! handle is shared by every router built in the process.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;

pub const TRAIN_TOTAL: &str = "facemate_train_total";
pub const TRAIN_SECONDS: &str = "facemate_train_duration_seconds";
pub const COMPARE_TOTAL: &str = "facemate_compare_total";
pub const COMPARE_SECONDS: &str = "facemate_compare_duration_seconds";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder on first use and return its handle.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .cloned()
}

/// Count a `train` call and record its latency. `outcome` is `"success"`
/// or the error code.
pub fn record_train(outcome: &'static str, elapsed: Duration) {
    metrics::counter!(TRAIN_TOTAL, "outcome" => outcome).increment(1);
    metrics::histogram!(TRAIN_SECONDS).record(elapsed.as_secs_f64());
}

/// Count a `compare` call and record its latency.
pub fn record_compare(outcome: &'static str, elapsed: Duration) {
    metrics::counter!(COMPARE_TOTAL, "outcome" => outcome).increment(1);
    metrics::histogram!(COMPARE_SECONDS).record(elapsed.as_secs_f64());
}
