use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::DateTime;
use metrics::counter;

use super::client::SeiClient;
use super::types::{
    AccountResponse, BalancesResponse, BlockResponse, InflationResponse, PoolResponse,
    SupplyResponse, TxResponse, TxSearchResponse, ValidatorsResponse,
};
use crate::cache::TtlCache;
use crate::errors::AnalyzerError;
use crate::models::{
    AccountInfo, Direction, NetworkStats, TransactionRecord, TxStatus, WalletSnapshot,
};

/// Hard ceiling on transactions per request.
pub const MAX_TX_LIMIT: usize = 200;
pub const DEFAULT_TX_LIMIT: usize = 100;

/// Blocks to look back when estimating average block time.
const BLOCK_TIME_WINDOW: u64 = 100;

/// Source of wallet and network data.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    async fn fetch_account(&self, address: &str) -> Result<AccountInfo, AnalyzerError>;

    /// Most recent transactions first, at most `limit`.
    async fn fetch_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, AnalyzerError>;

    async fn fetch_network_stats(&self) -> Result<NetworkStats, AnalyzerError>;

    fn default_tx_limit(&self) -> usize {
        DEFAULT_TX_LIMIT
    }

    /// Balance plus recent history. A failed history lookup degrades to an
    /// empty list; a failed balance lookup fails the whole snapshot.
    async fn fetch_snapshot(&self, address: &str) -> Result<WalletSnapshot, AnalyzerError> {
        let account = self.fetch_account(address).await?;
        let transactions = match self
            .fetch_transactions(address, self.default_tx_limit())
            .await
        {
            Ok(txs) => txs,
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Transaction history unavailable");
                Vec::new()
            }
        };
        Ok(WalletSnapshot::new(
            account.address,
            account.balance_sei,
            transactions,
        ))
    }
}

/// Reject anything that is not a plain alphanumeric address before it is
/// spliced into a URL path or an event query.
pub fn validate_address(address: &str) -> Result<&str, AnalyzerError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AnalyzerError::invalid("address must not be empty"));
    }
    if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AnalyzerError::invalid(format!(
            "address contains invalid characters: {address}"
        )));
    }
    Ok(address)
}

/// Chain constants the fetcher needs to interpret raw amounts.
#[derive(Debug, Clone)]
pub struct SeiNetwork {
    pub chain_id: String,
    pub denom: String,
    pub decimals: u32,
}

impl Default for SeiNetwork {
    fn default() -> Self {
        Self {
            chain_id: "pacific-1".into(),
            denom: "usei".into(),
            decimals: 6,
        }
    }
}

impl SeiNetwork {
    fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    /// Base units to whole tokens.
    pub fn to_display(&self, base_units: f64) -> f64 {
        base_units / self.scale()
    }

    /// Amount of this network's denom inside a coin string such as
    /// `"1500000usei"` or `"5ibc/ABC,1500000usei"`. Last match wins.
    pub fn parse_coin_amount(&self, raw: &str) -> Option<u128> {
        raw.split(',')
            .filter_map(|coin| coin.trim().strip_suffix(self.denom.as_str()))
            .filter_map(|digits| digits.parse::<u128>().ok())
            .last()
    }
}

pub struct SeiFetcher {
    client: SeiClient,
    network: SeiNetwork,
    stats_cache: TtlCache<NetworkStats>,
    tx_limit: usize,
}

impl SeiFetcher {
    pub fn new(client: SeiClient, network: SeiNetwork, stats_cache: TtlCache<NetworkStats>) -> Self {
        Self {
            client,
            network,
            stats_cache,
            tx_limit: DEFAULT_TX_LIMIT,
        }
    }

    pub fn with_tx_limit(mut self, limit: usize) -> Self {
        self.tx_limit = limit.clamp(1, MAX_TX_LIMIT);
        self
    }

    pub fn network(&self) -> &SeiNetwork {
        &self.network
    }

    async fn search_txs(
        &self,
        event: &str,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TxResponse>, AnalyzerError> {
        let query = [
            ("events", format!("{event}='{address}'")),
            ("pagination.limit", limit.to_string()),
            ("order_by", "ORDER_BY_DESC".to_string()),
        ];
        let resp: TxSearchResponse = self.client.get_json("cosmos/tx/v1beta1/txs", &query).await?;
        Ok(resp.into_responses())
    }

    /// Convert a raw tx response into a record seen from `address`.
    pub fn parse_transaction(
        &self,
        raw: &TxResponse,
        address: &str,
        direction: Direction,
    ) -> TransactionRecord {
        let mut amount_base: u128 = 0;
        let mut sender: Option<String> = None;
        let mut recipient: Option<String> = None;

        for event in raw.all_events().into_iter().filter(|e| e.kind == "transfer") {
            for attr in &event.attributes {
                match attr.key.as_str() {
                    "amount" => {
                        if let Some(v) = self.network.parse_coin_amount(&attr.value) {
                            amount_base = v;
                        }
                    }
                    "sender" => sender = Some(attr.value.clone()),
                    "recipient" => recipient = Some(attr.value.clone()),
                    _ => {}
                }
            }
        }

        let counterparty = match direction {
            Direction::Outgoing => recipient.clone(),
            Direction::Incoming => sender.clone(),
            Direction::Unknown => None,
        }
        .filter(|c| c != address);

        // The subject's own side of the transfer is not a party to it.
        let sender = sender.filter(|s| s != address);
        let recipient = recipient.filter(|r| r != address);

        let fee = raw
            .first_fee_amount()
            .and_then(|a| a.parse::<f64>().ok())
            .map(|a| self.network.to_display(a));

        TransactionRecord {
            amount: self.network.to_display(amount_base as f64),
            direction,
            kind: message_kind(raw.first_message_type()).to_string(),
            counterparty,
            sender,
            recipient,
            status: TxStatus::from_code(raw.code),
            hash: Some(raw.txhash.clone()).filter(|h| !h.is_empty()),
            height: raw.height_u64(),
            timestamp: Some(raw.timestamp.clone()).filter(|t| !t.is_empty()),
            fee,
        }
    }

    async fn load_network_stats(&self) -> Result<NetworkStats, AnalyzerError> {
        let latest: BlockResponse = self
            .client
            .get_json("cosmos/base/tendermint/v1beta1/blocks/latest", &[])
            .await?;
        let validators: ValidatorsResponse = self
            .client
            .get_json(
                "cosmos/staking/v1beta1/validators",
                &[
                    ("status", "BOND_STATUS_BONDED".to_string()),
                    ("pagination.limit", "1000".to_string()),
                    ("pagination.count_total", "true".to_string()),
                ],
            )
            .await?;
        let pool: PoolResponse = self.client.get_json("cosmos/staking/v1beta1/pool", &[]).await?;
        let supply: SupplyResponse = self
            .client
            .get_json(
                &format!("cosmos/bank/v1beta1/supply/{}", self.network.denom),
                &[],
            )
            .await?;

        let header = latest.header();
        let block_height = header
            .and_then(|h| h.height.parse::<u64>().ok())
            .unwrap_or_default();
        let latest_block_time = header.map(|h| h.time.clone()).filter(|t| !t.is_empty());
        let chain_id = header
            .map(|h| h.chain_id.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.network.chain_id.clone());

        let active_validators = validators
            .pagination
            .as_ref()
            .and_then(|p| p.total.as_deref())
            .and_then(|t| t.parse::<u32>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(validators.validators.len() as u32);

        let bonded_base = pool
            .pool
            .as_ref()
            .and_then(|p| p.bonded_tokens.parse::<f64>().ok())
            .unwrap_or_default();
        let supply_base = supply
            .amount
            .as_ref()
            .and_then(|c| c.amount.parse::<f64>().ok())
            .unwrap_or_default();

        let block_time_secs = match (block_height, latest_block_time.as_deref()) {
            (h, Some(t)) if h > BLOCK_TIME_WINDOW => self.average_block_time(h, t).await,
            _ => None,
        };

        Ok(NetworkStats {
            chain_id,
            block_height,
            latest_block_time,
            block_time_secs,
            active_validators,
            total_validators: None,
            total_bonded_tokens: self.network.to_display(bonded_base),
            total_supply: self.network.to_display(supply_base),
            staking_ratio: NetworkStats::compute_staking_ratio(bonded_base, supply_base),
            inflation: self.inflation().await,
        })
    }

    /// Mean block interval over the last window. Best effort.
    async fn average_block_time(&self, height: u64, latest_time: &str) -> Option<f64> {
        let earlier_height = height - BLOCK_TIME_WINDOW;
        let earlier: BlockResponse = match self
            .client
            .get_json(
                &format!("cosmos/base/tendermint/v1beta1/blocks/{earlier_height}"),
                &[],
            )
            .await
        {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(error = %e, "Block time estimate skipped");
                return None;
            }
        };

        let end = DateTime::parse_from_rfc3339(latest_time).ok()?;
        let start = DateTime::parse_from_rfc3339(&earlier.header()?.time).ok()?;
        let millis = (end - start).num_milliseconds();
        if millis <= 0 {
            return None;
        }
        Some(millis as f64 / 1000.0 / BLOCK_TIME_WINDOW as f64)
    }

    async fn inflation(&self) -> Option<f64> {
        match self
            .client
            .get_json::<InflationResponse>("cosmos/mint/v1beta1/inflation", &[])
            .await
        {
            Ok(resp) => resp.inflation.and_then(|i| i.parse().ok()),
            Err(e) => {
                tracing::debug!(error = %e, "Inflation unavailable");
                None
            }
        }
    }
}

/// Category from a message `@type` URL.
fn message_kind(type_url: Option<&str>) -> &'static str {
    let Some(t) = type_url else {
        return "transfer";
    };
    let t = t.to_lowercase();
    if t.contains("staking") {
        "staking"
    } else if t.contains("gov") {
        "governance"
    } else if t.contains("distribution") {
        "rewards"
    } else {
        "transfer"
    }
}

/// Newest first; records without a timestamp sink to the end.
fn sort_newest_first(txs: &mut [TransactionRecord]) {
    txs.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[async_trait]
impl DataFetcher for SeiFetcher {
    async fn fetch_account(&self, address: &str) -> Result<AccountInfo, AnalyzerError> {
        let address = validate_address(address)?;

        let balances: BalancesResponse = self
            .client
            .get_json(&format!("cosmos/bank/v1beta1/balances/{address}"), &[])
            .await?;

        let balance_usei = balances
            .balances
            .iter()
            .find(|c| c.denom == self.network.denom)
            .and_then(|c| c.amount.parse::<u128>().ok())
            .unwrap_or_default();

        // Fresh accounts have no auth record yet; that is not an error.
        let account = match self
            .client
            .get_json::<AccountResponse>(&format!("cosmos/auth/v1beta1/accounts/{address}"), &[])
            .await
        {
            Ok(resp) => resp.account,
            Err(e) => {
                tracing::debug!(address = %address, error = %e, "Account record unavailable");
                None
            }
        };

        Ok(AccountInfo {
            address: address.to_string(),
            balance_sei: self.network.to_display(balance_usei as f64),
            balance_usei,
            account_number: account.as_ref().and_then(|a| a.account_number.clone()),
            sequence: account.and_then(|a| a.sequence),
            balances: balances.balances,
        })
    }

    async fn fetch_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, AnalyzerError> {
        let address = validate_address(address)?;
        let limit = limit.clamp(1, MAX_TX_LIMIT);
        let per_side = (limit / 2).max(1);

        let sent = self.search_txs("message.sender", address, per_side).await;
        let received = self.search_txs("transfer.recipient", address, per_side).await;

        if let (Err(e), Err(_)) = (&sent, &received) {
            return Err(AnalyzerError::Network(e.to_string()));
        }

        let mut txs: Vec<TransactionRecord> = Vec::new();
        for (side, direction) in [(sent, Direction::Outgoing), (received, Direction::Incoming)] {
            match side {
                Ok(raw) => txs.extend(
                    raw.iter()
                        .map(|r| self.parse_transaction(r, address, direction)),
                ),
                Err(e) => {
                    tracing::warn!(address = %address, direction = %direction, error = %e, "Partial transaction history");
                }
            }
        }

        sort_newest_first(&mut txs);
        txs.truncate(limit);
        Ok(txs)
    }

    async fn fetch_network_stats(&self) -> Result<NetworkStats, AnalyzerError> {
        if let Some(stats) = self.stats_cache.get() {
            counter!("network_stats_cache_hits_total").increment(1);
            return Ok(stats);
        }

        match self.load_network_stats().await {
            Ok(stats) => {
                self.stats_cache.set(stats.clone());
                Ok(stats)
            }
            Err(e) => match self.stats_cache.get_stale() {
                Some(stale) => {
                    tracing::warn!(
                        error = %e,
                        age_secs = self.stats_cache.age().map(|a| a.as_secs()).unwrap_or_default(),
                        "Serving stale network stats"
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    fn default_tx_limit(&self) -> usize {
        self.tx_limit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
