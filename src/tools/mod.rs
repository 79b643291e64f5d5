pub mod input;

use std::time::Instant;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::AnalyzerError;
use crate::models::{
    AccountInfo, ComparisonResult, NetworkHealthReport, NetworkStats, TransactionRecord,
    WalletAnalysis, WalletSnapshot,
};
use crate::AppState;
use input::{comparison_sources, wallet_source, WalletSource};

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    AnalyzeWallet,
    CompareAddresses,
    AnalyzeNetworkHealth,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [
        ToolName::AnalyzeWallet,
        ToolName::CompareAddresses,
        ToolName::AnalyzeNetworkHealth,
    ];

    /// Canonical names plus the names older clients still send.
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "analyze_wallet" | "analyze_wallet_live" => Some(ToolName::AnalyzeWallet),
            "compare_addresses" | "compare_sei_addresses" => Some(ToolName::CompareAddresses),
            "analyze_network_health" | "get_sei_network_health" => {
                Some(ToolName::AnalyzeNetworkHealth)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::AnalyzeWallet => "analyze_wallet",
            ToolName::CompareAddresses => "compare_addresses",
            ToolName::AnalyzeNetworkHealth => "analyze_network_health",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ToolName::AnalyzeWallet => {
                "Score a Sei wallet: whale, risk and influence scores, transaction patterns, \
                 classification and recommendations. Pass walletData for offline analysis or \
                 an address to fetch live chain data."
            }
            ToolName::CompareAddresses => {
                "Compare two or more Sei wallets given as address strings or walletData objects."
            }
            ToolName::AnalyzeNetworkHealth => {
                "Score current Sei network health from live validator, staking and block data."
            }
        }
    }

    fn input_schema(&self) -> Value {
        match self {
            ToolName::AnalyzeWallet => json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Sei address to fetch live" },
                    "walletData": {
                        "type": "object",
                        "properties": {
                            "address": { "type": "string" },
                            "balance": { "type": "number", "minimum": 0 },
                            "transactions": { "type": "array", "items": { "type": "object" } }
                        },
                        "required": ["address"]
                    }
                }
            }),
            ToolName::CompareAddresses => json!({
                "type": "object",
                "properties": {
                    "addresses": {
                        "type": "array",
                        "minItems": 2,
                        "items": { "anyOf": [{ "type": "string" }, { "type": "object" }] }
                    }
                },
                "required": ["addresses"]
            }),
            ToolName::AnalyzeNetworkHealth => json!({ "type": "object", "properties": {} }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn definitions() -> Vec<ToolDefinition> {
    ToolName::ALL
        .iter()
        .map(|t| ToolDefinition {
            name: t.as_str(),
            description: t.description(),
            input_schema: t.input_schema(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Provided,
    Live,
    Mixed,
}

/// Engine output stamped with when and from what it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T> {
    pub analysis_timestamp: DateTime<Utc>,
    pub data_source: DataSource,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Report<T> {
    fn new(data_source: DataSource, body: T) -> Self {
        Self {
            analysis_timestamp: Utc::now(),
            data_source,
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionList {
    pub address: String,
    pub count: usize,
    pub limit: usize,
    pub transactions: Vec<TransactionRecord>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Run a tool by (possibly aliased) name and return its structured result.
pub async fn call(state: &AppState, name: &str, args: &Value) -> Result<Value, AnalyzerError> {
    let tool = ToolName::resolve(name)
        .ok_or_else(|| AnalyzerError::invalid(format!("Unknown tool: {name}")))?;

    let value = match tool {
        ToolName::AnalyzeWallet => to_value(analyze_wallet(state, args).await?)?,
        ToolName::CompareAddresses => to_value(compare_addresses(state, args).await?)?,
        ToolName::AnalyzeNetworkHealth => to_value(analyze_network_health(state).await?)?,
    };
    Ok(value)
}

pub async fn analyze_wallet(
    state: &AppState,
    args: &Value,
) -> Result<Report<WalletAnalysis>, AnalyzerError> {
    let (snapshot, source) = match wallet_source(args)? {
        WalletSource::Provided(snapshot) => (snapshot, DataSource::Provided),
        WalletSource::Live(address) => {
            (state.fetcher.fetch_snapshot(&address).await?, DataSource::Live)
        }
    };

    let analysis = score(state, &snapshot);
    counter!("wallet_analyses_total").increment(1);
    tracing::info!(
        address = %analysis.address,
        classification = %analysis.classification,
        overall = analysis.scores.overall_score,
        "Wallet analyzed"
    );
    Ok(Report::new(source, analysis))
}

pub async fn compare_addresses(
    state: &AppState,
    args: &Value,
) -> Result<Report<ComparisonResult>, AnalyzerError> {
    let sources = comparison_sources(args)?;

    let mut analyses = Vec::with_capacity(sources.len());
    let (mut provided, mut live) = (0usize, 0usize);

    for source in sources {
        let snapshot = match source {
            WalletSource::Provided(snapshot) => {
                provided += 1;
                snapshot
            }
            WalletSource::Live(address) => match state.fetcher.fetch_snapshot(&address).await {
                Ok(snapshot) => {
                    live += 1;
                    snapshot
                }
                Err(e) => {
                    tracing::warn!(address = %address, error = %e, "Skipping address in comparison");
                    continue;
                }
            },
        };
        analyses.push(score(state, &snapshot));
    }

    let result = state.engine.compare(&analyses)?;
    counter!("comparisons_total").increment(1);

    let source = match (provided, live) {
        (_, 0) => DataSource::Provided,
        (0, _) => DataSource::Live,
        _ => DataSource::Mixed,
    };
    Ok(Report::new(source, result))
}

pub async fn analyze_network_health(
    state: &AppState,
) -> Result<Report<NetworkHealthReport>, AnalyzerError> {
    let stats = state.fetcher.fetch_network_stats().await?;
    let report = state.engine.score_network(&stats);
    counter!("network_health_requests_total").increment(1);
    tracing::info!(
        score = report.overall_score,
        status = %report.status,
        "Network health scored"
    );
    Ok(Report::new(DataSource::Live, report))
}

pub async fn network_stats(state: &AppState) -> Result<Report<NetworkStats>, AnalyzerError> {
    let stats = state.fetcher.fetch_network_stats().await?;
    Ok(Report::new(DataSource::Live, stats))
}

pub async fn account(state: &AppState, address: &str) -> Result<AccountInfo, AnalyzerError> {
    state.fetcher.fetch_account(address).await
}

pub async fn transactions(
    state: &AppState,
    address: &str,
    limit: usize,
) -> Result<TransactionList, AnalyzerError> {
    let limit = limit.clamp(1, crate::sei::MAX_TX_LIMIT);
    let transactions = state.fetcher.fetch_transactions(address, limit).await?;
    Ok(TransactionList {
        address: address.trim().to_string(),
        count: transactions.len(),
        limit,
        transactions,
    })
}

fn score(state: &AppState, snapshot: &WalletSnapshot) -> WalletAnalysis {
    let started = Instant::now();
    let analysis = state.engine.score_wallet(snapshot);
    histogram!("analysis_latency_seconds").record(started.elapsed().as_secs_f64());
    analysis
}

fn to_value<T: Serialize>(report: T) -> Result<Value, AnalyzerError> {
    serde_json::to_value(report)
        .map_err(|e| AnalyzerError::Internal(anyhow::anyhow!("failed to serialize tool result: {e}")))
}
