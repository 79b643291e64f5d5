use serde::{Deserialize, Serialize};
use std::fmt;

/// Network-wide statistics, either fetched live or supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub chain_id: String,
    pub block_height: u64,
    /// Latest block timestamp as reported by the node (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_block_time: Option<String>,
    /// Average seconds between blocks, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time_secs: Option<f64>,
    pub active_validators: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_validators: Option<u32>,
    pub total_bonded_tokens: f64,
    pub total_supply: f64,
    pub staking_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation: Option<f64>,
}

impl NetworkStats {
    /// Bonded / supply, guarded against an empty supply.
    pub fn compute_staking_ratio(bonded: f64, supply: f64) -> f64 {
        if supply > 0.0 {
            bonded / supply
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "Excellent"),
            HealthStatus::Good => write!(f, "Good"),
            HealthStatus::Fair => write!(f, "Fair"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkHealthReport {
    pub overall_score: f64,
    pub status: HealthStatus,
    pub model: String,
    pub metrics: NetworkStats,
    pub analysis: NetworkAnalysis,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAnalysis {
    pub staking_participation: String,
    pub validator_participation: String,
    pub validator_count: u32,
    pub network_security: String,
    pub block_performance: String,
    pub decentralization_score: f64,
    pub latest_block: u64,
}

/// Account record as returned by the bank/auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: String,
    pub balance_sei: f64,
    pub balance_usei: u128,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    #[serde(default)]
    pub balances: Vec<CoinBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinBalance {
    pub denom: String,
    pub amount: String,
}
