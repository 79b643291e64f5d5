use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::assessment::RecommendationSet;
use super::chain::RewardParams;
use super::classifier::RuleSet;
use super::network::HealthModel;
use super::scorer::OverallWeights;

/// Named policy preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    /// Weights and precedence used for caller-supplied wallet data.
    Standard,
    /// Weights and precedence used for wallets resolved from live chain data.
    Live,
}

impl PolicyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyName::Standard => "standard",
            PolicyName::Live => "live",
        }
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "synthetic" | "default" => Ok(PolicyName::Standard),
            "live" => Ok(PolicyName::Live),
            other => Err(format!("unknown scoring policy: {other}")),
        }
    }
}

/// Weights, classification precedence, advisory rules and network-health model.
///
/// The two presets differ in overall weights (0.3/0.3/0.4 vs 0.4/0.3/0.3),
/// classification rules and recommendations; both are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub name: PolicyName,
    pub weights: OverallWeights,
    pub classification: RuleSet,
    pub recommendations: RecommendationSet,
    pub health_model: HealthModel,
}

impl ScoringPolicy {
    pub fn standard() -> Self {
        Self {
            name: PolicyName::Standard,
            weights: OverallWeights::STANDARD,
            classification: RuleSet::standard(),
            recommendations: RecommendationSet::standard(),
            health_model: HealthModel::Composite,
        }
    }

    pub fn live() -> Self {
        Self {
            name: PolicyName::Live,
            weights: OverallWeights::LIVE,
            classification: RuleSet::live(),
            recommendations: RecommendationSet::live(),
            health_model: HealthModel::Targeted,
        }
    }

    pub fn preset(name: PolicyName) -> Self {
        match name {
            PolicyName::Standard => Self::standard(),
            PolicyName::Live => Self::live(),
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chain constants the engine needs; everything else is derived from input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Total token supply in SEI.
    pub total_supply: f64,
    /// Approximate fiat price per token for value estimates.
    pub price_usd: f64,
    pub rewards: RewardParams,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            total_supply: 10_000_000_000.0,
            price_usd: 0.45,
            rewards: RewardParams::default(),
        }
    }
}
