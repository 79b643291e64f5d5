use super::stats;
use crate::errors::AnalyzerError;
use crate::models::{
    AddressComparison, ComparisonInsights, ComparisonResult, ComparisonSummary, WalletAnalysis,
};

pub const MIN_COMPARISON_SIZE: usize = 2;

/// Whale score above which an address counts toward whale concentration.
const WHALE_THRESHOLD: f64 = 0.7;
/// Risk factor above which an address counts as high risk.
const HIGH_RISK_THRESHOLD: f64 = 0.7;
/// Whale-score stdev below which the set is clustered tightly enough to review.
const CLUSTER_STDEV: f64 = 0.1;
/// Transaction count above which an address counts as highly active.
const HIGH_ACTIVITY_TX_COUNT: usize = 100;
/// Balance coefficient of variation below which addresses may be related.
const RELATED_BALANCE_CV: f64 = 0.3;

pub const MANUAL_REVIEW: &str = "Manual review recommended";
pub const NO_CONNECTIONS: &str = "No obvious connections";
pub const RELATED_POSSIBLE: &str = "Possible";
pub const RELATED_UNLIKELY: &str = "Unlikely";

/// Aggregate two or more analyses into dispersion and threshold statistics.
pub fn compare(analyses: &[WalletAnalysis]) -> Result<ComparisonResult, AnalyzerError> {
    if analyses.len() < MIN_COMPARISON_SIZE {
        return Err(AnalyzerError::InsufficientInput(format!(
            "At least {MIN_COMPARISON_SIZE} addresses required for comparison, got {}",
            analyses.len()
        )));
    }

    let whale: Vec<f64> = analyses.iter().map(|a| a.scores.whale_score).collect();
    let risk: Vec<f64> = analyses.iter().map(|a| a.scores.risk_factor).collect();
    let influence: Vec<f64> = analyses.iter().map(|a| a.scores.influence_score).collect();
    let balances: Vec<f64> = analyses.iter().map(|a| a.wallet_metrics.balance).collect();

    let whale_stdev = stats::population_stdev(&whale);
    let total_balance: f64 = balances.iter().sum();
    let mean_balance = stats::mean(&balances);
    let balance_cv = balance_cv(&balances);

    let summary = ComparisonSummary {
        total_addresses: analyses.len(),
        highest_whale_score: stats::max(&whale),
        lowest_whale_score: stats::min(&whale),
        average_whale_score: stats::round3(stats::mean(&whale)),
        whale_score_stdev: stats::round3(whale_stdev),
        highest_risk: stats::max(&risk),
        lowest_risk: stats::min(&risk),
        average_risk: stats::round3(stats::mean(&risk)),
        highest_influence: stats::max(&influence),
        average_influence: stats::round3(stats::mean(&influence)),
        highest_balance: stats::max(&balances),
        lowest_balance: stats::min(&balances),
        average_balance: mean_balance,
        total_combined_balance: total_balance,
        balance_similarity_score: stats::round3(1.0 - balance_cv.min(1.0)),
    };

    let insights = ComparisonInsights {
        whale_concentration: whale.iter().filter(|&&w| w > WHALE_THRESHOLD).count(),
        high_risk_addresses: risk.iter().filter(|&&r| r > HIGH_RISK_THRESHOLD).count(),
        potential_connections: if whale_stdev < CLUSTER_STDEV {
            MANUAL_REVIEW.into()
        } else {
            NO_CONNECTIONS.into()
        },
        combined_influence: combined_influence(total_balance).into(),
        high_activity_addresses: analyses
            .iter()
            .filter(|a| a.wallet_metrics.transaction_count > HIGH_ACTIVITY_TX_COUNT)
            .count(),
        potential_related_addresses: if balance_cv < RELATED_BALANCE_CV {
            RELATED_POSSIBLE.into()
        } else {
            RELATED_UNLIKELY.into()
        },
    };

    let individual_analysis = analyses
        .iter()
        .map(|a| AddressComparison {
            address: a.address.clone(),
            classification: a.classification,
            whale_score: a.scores.whale_score,
            risk_factor: a.scores.risk_factor,
            influence_score: a.scores.influence_score,
            balance: a.wallet_metrics.balance,
            tx_count: a.wallet_metrics.transaction_count,
        })
        .collect();

    Ok(ComparisonResult {
        comparison_summary: summary,
        individual_analysis,
        insights,
    })
}

/// Coefficient of variation of balances; 1.0 when the mean is not positive.
fn balance_cv(balances: &[f64]) -> f64 {
    let mean = stats::mean(balances);
    if mean <= 0.0 {
        return 1.0;
    }
    stats::population_stdev(balances) / mean
}

fn combined_influence(total_balance: f64) -> &'static str {
    if total_balance > 1_000_000.0 {
        "High"
    } else if total_balance > 100_000.0 {
        "Medium"
    } else {
        "Low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::ScoringEngine;
    use crate::models::{Direction, TransactionRecord, WalletSnapshot};

    fn busy(address: &str, balance: f64, tx_count: usize) -> WalletAnalysis {
        let txs = (0..tx_count)
            .map(|i| {
                TransactionRecord::new(1.0, Direction::Outgoing, "transfer")
                    .with_counterparty(format!("sei1peer{i}"))
            })
            .collect();
        ScoringEngine::default().score_wallet(&WalletSnapshot::new(address, balance, txs))
    }

    #[test]
    fn test_similar_balances_may_be_related() {
        let result = compare(&[busy("sei1a", 1_000.0, 101), busy("sei1b", 1_200.0, 100)]).unwrap();

        assert_eq!(result.insights.high_activity_addresses, 1);
        assert_eq!(result.insights.potential_related_addresses, RELATED_POSSIBLE);
        assert_eq!(result.comparison_summary.balance_similarity_score, 0.909);
    }

    #[test]
    fn test_spread_or_empty_balances_are_unlikely_related() {
        let spread = compare(&[busy("sei1a", 10.0, 0), busy("sei1b", 10_000.0, 0)]).unwrap();
        assert_eq!(spread.insights.potential_related_addresses, RELATED_UNLIKELY);
        assert_eq!(spread.insights.high_activity_addresses, 0);

        let empty = compare(&[busy("sei1a", 0.0, 0), busy("sei1b", 0.0, 0)]).unwrap();
        assert_eq!(empty.insights.potential_related_addresses, RELATED_UNLIKELY);
        assert_eq!(empty.comparison_summary.balance_similarity_score, 0.0);
    }
}
