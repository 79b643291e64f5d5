use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {e}"))?;

    register_metrics();
    Ok(handle)
}

/// Handle backed by a recorder that is not installed globally. Tests build
/// many apps per process and only one global recorder may exist.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn register_metrics() {
    // Pre-register counters so they appear even before the first increment.
    counter!("wallet_analyses_total").absolute(0);
    counter!("comparisons_total").absolute(0);
    counter!("network_health_requests_total").absolute(0);
    counter!("upstream_request_failures_total").absolute(0);
    counter!("network_stats_cache_hits_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("analysis_latency_seconds").record(0.0);
}
