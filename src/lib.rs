pub mod api;
pub mod cache;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod intelligence;
pub mod metrics;
pub mod models;
pub mod rpc;
pub mod sei;
pub mod stdio;
pub mod tools;

use std::sync::Arc;

use crate::cache::TtlCache;
use crate::config::AppConfig;
use crate::discovery::ServerDiscovery;
use crate::intelligence::ScoringEngine;
use crate::sei::{DataFetcher, SeiClient, SeiFetcher};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<ScoringEngine>,
    pub fetcher: Arc<dyn DataFetcher>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub servers: Option<Arc<ServerDiscovery>>,
}

impl AppState {
    /// Wire the live Sei fetcher and scoring engine from configuration.
    pub fn from_config(
        config: AppConfig,
        metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sei-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let client = SeiClient::new(http, config.sei_api_endpoints.clone(), config.request_timeout);
        let fetcher = SeiFetcher::new(
            client,
            config.sei_network(),
            TtlCache::new(config.network_cache_ttl),
        )
        .with_tx_limit(config.tx_fetch_limit);

        // Discovery is optional; a bad file only disables /servers.
        let servers = match &config.mcp_config_path {
            Some(path) => match ServerDiscovery::load(path) {
                Ok(d) => Some(Arc::new(d)),
                Err(e) => {
                    tracing::warn!(error = %e, "Tool server discovery disabled");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            engine: Arc::new(config.build_engine()),
            fetcher: Arc::new(fetcher),
            metrics_handle,
            servers,
            config,
        })
    }
}
