use serde::{Deserialize, Serialize};

use super::stats::round3;
use crate::models::network::NetworkAnalysis;
use crate::models::{HealthStatus, NetworkHealthReport, NetworkStats};

/// How network health is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthModel {
    /// Validator ratio 0.3, staking ratio 0.4, block time 0.3.
    Composite,
    /// Staking vs 60% target 0.4, validators vs 80 target 0.4, base 0.2.
    Targeted,
}

impl HealthModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthModel::Composite => "composite",
            HealthModel::Targeted => "targeted",
        }
    }
}

const STAKING_TARGET: f64 = 0.6;
const VALIDATOR_TARGET: f64 = 80.0;
const FAST_BLOCK_SECS: f64 = 1.0;
const OPTIMAL_BLOCK_SECS: f64 = 0.6;

pub fn score_network(stats: &NetworkStats, model: HealthModel) -> NetworkHealthReport {
    let validator_ratio = validator_ratio(stats);
    let staking_ratio = stats.staking_ratio;

    let raw = match model {
        HealthModel::Composite => {
            let block_term = match stats.block_time_secs {
                Some(t) if t >= FAST_BLOCK_SECS => 0.8,
                _ => 1.0,
            };
            validator_ratio * 0.3 + staking_ratio * 0.4 + block_term * 0.3
        }
        HealthModel::Targeted => {
            (staking_ratio / STAKING_TARGET).min(1.0) * 0.4
                + (stats.active_validators as f64 / VALIDATOR_TARGET).min(1.0) * 0.4
                + 0.2
        }
    };
    let score = raw.clamp(0.0, 1.0);

    let status = if score > 0.9 {
        HealthStatus::Excellent
    } else if score > 0.7 {
        HealthStatus::Good
    } else {
        HealthStatus::Fair
    };

    let block_performance = match stats.block_time_secs {
        Some(t) if t < OPTIMAL_BLOCK_SECS => "Optimal",
        Some(_) => "Good",
        None => "Unknown",
    };

    let analysis = NetworkAnalysis {
        staking_participation: format!("{:.1}%", staking_ratio * 100.0),
        validator_participation: format!("{:.1}%", validator_ratio * 100.0),
        validator_count: stats.active_validators,
        network_security: if staking_ratio > STAKING_TARGET { "High" } else { "Medium" }.into(),
        block_performance: block_performance.into(),
        decentralization_score: round3(validator_ratio * staking_ratio),
        latest_block: stats.block_height,
    };

    let mut recommendations = Vec::new();
    if score > 0.9 {
        recommendations.push("Network is performing optimally".to_string());
    }
    if validator_ratio < 0.9 {
        recommendations.push("Monitor validator participation".to_string());
    }
    if staking_ratio < STAKING_TARGET {
        recommendations.push("Encourage more staking".to_string());
    }

    NetworkHealthReport {
        overall_score: round3(score),
        status,
        model: model.as_str().into(),
        metrics: stats.clone(),
        analysis,
        recommendations,
    }
}

/// Active / total validators; 1.0 when the total is unknown.
fn validator_ratio(stats: &NetworkStats) -> f64 {
    match stats.total_validators {
        Some(total) if total > 0 => (stats.active_validators as f64 / total as f64).min(1.0),
        _ => 1.0,
    }
}
