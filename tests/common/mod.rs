use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use sei_analyzer::api::router::create_router;
use sei_analyzer::config::AppConfig;
use sei_analyzer::discovery::ServerDiscovery;
use sei_analyzer::errors::AnalyzerError;
use sei_analyzer::models::{AccountInfo, Direction, NetworkStats, TransactionRecord, WalletSnapshot};
use sei_analyzer::sei::DataFetcher;
use sei_analyzer::AppState;

/// In-memory stand-in for the Sei REST API.
#[derive(Default)]
pub struct MockFetcher {
    pub wallets: HashMap<String, WalletSnapshot>,
    pub network: Option<NetworkStats>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn with_wallet(mut self, snapshot: WalletSnapshot) -> Self {
        self.wallets.insert(snapshot.address.clone(), snapshot);
        self
    }

    pub fn with_network(mut self, stats: NetworkStats) -> Self {
        self.network = Some(stats);
        self
    }

    fn lookup(&self, address: &str) -> Result<&WalletSnapshot, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.wallets
            .get(address)
            .ok_or_else(|| AnalyzerError::Network(format!("all endpoints failed for {address}")))
    }
}

#[async_trait]
impl DataFetcher for MockFetcher {
    async fn fetch_account(&self, address: &str) -> Result<AccountInfo, AnalyzerError> {
        let snap = self.lookup(address)?;
        Ok(AccountInfo {
            address: snap.address.clone(),
            balance_sei: snap.balance,
            balance_usei: (snap.balance * 1_000_000.0) as u128,
            account_number: Some("42".into()),
            sequence: Some("7".into()),
            balances: vec![],
        })
    }

    async fn fetch_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, AnalyzerError> {
        let snap = self.lookup(address)?;
        Ok(snap.transactions.iter().take(limit).cloned().collect())
    }

    async fn fetch_network_stats(&self) -> Result<NetworkStats, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.network
            .clone()
            .ok_or_else(|| AnalyzerError::Network("network stats unavailable".into()))
    }
}

#[allow(dead_code)]
pub fn sample_network() -> NetworkStats {
    NetworkStats {
        chain_id: "pacific-1".into(),
        block_height: 120_000_000,
        latest_block_time: Some("2024-05-01T10:00:00Z".into()),
        block_time_secs: Some(0.4),
        active_validators: 40,
        total_validators: Some(40),
        total_bonded_tokens: 6_500_000_000.0,
        total_supply: 10_000_000_000.0,
        staking_ratio: 0.65,
        inflation: None,
    }
}

#[allow(dead_code)]
pub fn sample_fetcher() -> MockFetcher {
    let trader_txs: Vec<TransactionRecord> = (0..20)
        .map(|i| {
            TransactionRecord::new(100.0 + i as f64, Direction::Outgoing, "transfer")
                .with_counterparty(format!("seivaloper{i}"))
        })
        .collect();

    MockFetcher::default()
        .with_wallet(WalletSnapshot::new("sei1whale", 5_000_000.0, vec![]))
        .with_wallet(WalletSnapshot::new("sei1trader", 25_000.0, trader_txs))
        .with_wallet(WalletSnapshot::new("sei1small", 10.0, vec![]))
        .with_network(sample_network())
}

#[allow(dead_code)]
pub fn build_state(fetcher: MockFetcher, servers: Option<ServerDiscovery>) -> AppState {
    let config = AppConfig::default();
    AppState {
        engine: Arc::new(config.build_engine()),
        fetcher: Arc::new(fetcher),
        metrics_handle: sei_analyzer::metrics::detached_handle(),
        servers: servers.map(Arc::new),
        config,
    }
}

#[allow(dead_code)]
pub fn build_test_app() -> axum::Router {
    create_router(build_state(sample_fetcher(), None))
}
