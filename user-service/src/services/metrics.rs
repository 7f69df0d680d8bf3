use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const USERS_CREATED_TOTAL: &str = "users_created_total";
pub const USERS_UPDATED_TOTAL: &str = "users_updated_total";
pub const USERS_DELETED_TOTAL: &str = "users_deleted_total";

/// Installs the global Prometheus recorder. Must run before any metric is recorded.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("failed to set metrics handle: already initialized"))?;

    metrics::describe_counter!(USERS_CREATED_TOTAL, "Total users created");
    metrics::describe_counter!(USERS_UPDATED_TOTAL, "Total users updated");
    metrics::describe_counter!(USERS_DELETED_TOTAL, "Total users deleted");

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_user_created() {
    metrics::counter!(USERS_CREATED_TOTAL).increment(1);
}

pub fn record_user_updated() {
    metrics::counter!(USERS_UPDATED_TOTAL).increment(1);
}

pub fn record_user_deleted() {
    metrics::counter!(USERS_DELETED_TOTAL).increment(1);
}
