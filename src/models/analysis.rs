use serde::{Deserialize, Serialize};
use std::fmt;

use super::TransactionRecord;
use crate::intelligence::classifier::Classification;

/// Full scoring output for one wallet. Pure function of the snapshot and policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAnalysis {
    pub address: String,
    pub policy: String,
    pub classification: Classification,
    pub scores: Scores,
    pub wallet_metrics: WalletMetrics,
    pub transaction_patterns: PatternSummary,
    pub activity: ActivitySummary,
    pub chain_specific_metrics: ChainMetrics,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub recent_transactions: Vec<TransactionRecord>,
}

/// All scores are in [0, 1], rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub whale_score: f64,
    pub risk_factor: f64,
    pub influence_score: f64,
    pub overall_score: f64,
    pub chain_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletMetrics {
    pub balance: f64,
    pub transaction_count: usize,
    pub estimated_usd_value: f64,
    pub balance_percentage_of_supply: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub primary_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_count: usize,
    pub average_amount: f64,
    pub median_amount: f64,
    pub max_amount: f64,
    pub min_amount: f64,
    pub incoming_ratio: f64,
    pub outgoing_ratio: f64,
}

/// Outcome counters over the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub successful_transactions: usize,
    pub failed_transactions: usize,
    pub total_volume: f64,
    pub staking_transactions: usize,
    pub reward_transactions: usize,
    /// Timestamp of the first record, the newest one for fetched wallets.
    #[serde(default)]
    pub latest_transaction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainMetrics {
    pub staking_amount: f64,
    pub defi_participation: bool,
    pub chain_score: f64,
    pub estimated_rewards: f64,
    pub validator_interactions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub comparison_summary: ComparisonSummary,
    pub individual_analysis: Vec<AddressComparison>,
    pub insights: ComparisonInsights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_addresses: usize,
    pub highest_whale_score: f64,
    pub lowest_whale_score: f64,
    pub average_whale_score: f64,
    pub whale_score_stdev: f64,
    pub highest_risk: f64,
    pub lowest_risk: f64,
    pub average_risk: f64,
    pub highest_influence: f64,
    pub average_influence: f64,
    pub highest_balance: f64,
    pub lowest_balance: f64,
    pub average_balance: f64,
    pub total_combined_balance: f64,
    pub balance_similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComparison {
    pub address: String,
    pub classification: Classification,
    pub whale_score: f64,
    pub risk_factor: f64,
    pub influence_score: f64,
    pub balance: f64,
    pub tx_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInsights {
    pub whale_concentration: usize,
    pub high_risk_addresses: usize,
    pub potential_connections: String,
    pub combined_influence: String,
    pub high_activity_addresses: usize,
    /// "Possible" when balances are tightly clustered, else "Unlikely".
    pub potential_related_addresses: String,
}
