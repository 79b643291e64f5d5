use serde::{Deserialize, Serialize};

use super::stats;
use crate::models::wallet::unique_counterparties;
use crate::models::TransactionRecord;

/// Whale tiers as `(supply divisor, score)`: a wallet reaches a tier when
/// `balance * divisor >= total_supply`, i.e. it holds at least `100 / divisor`
/// percent of supply. Divisors avoid the rounding drift of a percent compare.
pub const WHALE_TIERS: [(f64, f64); 5] = [
    (100.0, 1.0),       // >= 1%
    (1_000.0, 0.9),     // >= 0.1%
    (10_000.0, 0.7),    // >= 0.01%
    (100_000.0, 0.5),   // >= 0.001%
    (1_000_000.0, 0.3), // >= 0.0001%
];

/// Score for any positive balance below the lowest tier.
pub const WHALE_FLOOR_SCORE: f64 = 0.1;

/// Risk reported for a wallet with no transactions.
pub const NEUTRAL_RISK: f64 = 0.5;

/// Influence reported for a wallet with no transactions.
pub const BASELINE_INFLUENCE: f64 = 0.1;

/// Weights of the overall score. `safety` applies to `1 - risk_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallWeights {
    pub whale: f64,
    pub safety: f64,
    pub influence: f64,
}

impl OverallWeights {
    pub const STANDARD: OverallWeights = OverallWeights {
        whale: 0.3,
        safety: 0.3,
        influence: 0.4,
    };

    pub const LIVE: OverallWeights = OverallWeights {
        whale: 0.4,
        safety: 0.3,
        influence: 0.3,
    };

    pub fn total(&self) -> f64 {
        self.whale + self.safety + self.influence
    }
}

// ---------------------------------------------------------------------------
// Whale score
// ---------------------------------------------------------------------------

/// Step function of the share of total supply held.
pub fn whale_score(balance: f64, total_supply: f64) -> f64 {
    if balance <= 0.0 || total_supply <= 0.0 {
        return 0.0;
    }

    WHALE_TIERS
        .iter()
        .find(|(divisor, _)| balance * divisor >= total_supply)
        .map(|(_, score)| *score)
        .unwrap_or(WHALE_FLOOR_SCORE)
}

/// Percentage of supply held, 0 when supply is unknown.
pub fn supply_percentage(balance: f64, total_supply: f64) -> f64 {
    if total_supply <= 0.0 {
        return 0.0;
    }
    balance / total_supply * 100.0
}

// ---------------------------------------------------------------------------
// Risk factor
// ---------------------------------------------------------------------------

/// Mean of frequency, amount-concentration and counterparty-diversity sub-scores.
pub fn risk_factor(transactions: &[TransactionRecord], balance: f64) -> f64 {
    if transactions.is_empty() {
        return NEUTRAL_RISK;
    }

    let sub_scores = [
        frequency_risk(transactions.len()),
        concentration_risk(transactions, balance),
        diversity_risk(transactions),
    ];

    stats::mean(&sub_scores).min(1.0)
}

fn frequency_risk(tx_count: usize) -> f64 {
    if tx_count > 1000 {
        0.8
    } else if tx_count > 100 {
        0.6
    } else {
        0.3
    }
}

fn concentration_risk(transactions: &[TransactionRecord], balance: f64) -> f64 {
    let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();

    if stats::max(&amounts) > balance * 0.5 {
        0.7
    } else if stats::mean(&amounts) > balance * 0.1 {
        0.6
    } else {
        0.3
    }
}

fn diversity_risk(transactions: &[TransactionRecord]) -> f64 {
    let ratio = unique_counterparties(transactions) as f64 / transactions.len().max(1) as f64;

    if ratio < 0.1 {
        0.8
    } else if ratio < 0.3 {
        0.6
    } else {
        0.3
    }
}

// ---------------------------------------------------------------------------
// Influence score
// ---------------------------------------------------------------------------

/// Weighted volume, activity and network-reach terms, each capped before weighting.
pub fn influence_score(transactions: &[TransactionRecord], balance: f64) -> f64 {
    if transactions.is_empty() {
        return BASELINE_INFLUENCE;
    }

    let total_volume: f64 = transactions.iter().map(|t| t.amount).sum();
    let volume_term = if balance > 0.0 {
        (total_volume / (balance * 10.0)).min(1.0) * 0.4
    } else {
        0.0
    };

    let activity_term = (transactions.len() as f64 / 1000.0).min(1.0) * 0.3;
    let network_term = (unique_counterparties(transactions) as f64 / 100.0).min(1.0) * 0.3;

    (volume_term + activity_term + network_term).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Overall score
// ---------------------------------------------------------------------------

pub fn overall_score(
    whale_score: f64,
    risk_factor: f64,
    influence_score: f64,
    weights: &OverallWeights,
) -> f64 {
    let raw = whale_score * weights.whale
        + (1.0 - risk_factor) * weights.safety
        + influence_score * weights.influence;
    raw.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    const SUPPLY: f64 = 10_000_000_000.0;

    fn tx(amount: f64, counterparty: &str) -> TransactionRecord {
        TransactionRecord::new(amount, Direction::Outgoing, "transfer").with_counterparty(counterparty)
    }

    #[test]
    fn test_whale_score_non_positive_balance() {
        assert_eq!(whale_score(0.0, SUPPLY), 0.0);
        assert_eq!(whale_score(-5.0, SUPPLY), 0.0);
    }

    #[test]
    fn test_whale_score_breakpoints_and_just_below() {
        let cases = [
            (100_000_000.0, 1.0, 99_999_999.0, 0.9),
            (10_000_000.0, 0.9, 9_999_999.0, 0.7),
            (1_000_000.0, 0.7, 999_999.0, 0.5),
            (100_000.0, 0.5, 99_999.0, 0.3),
            (10_000.0, 0.3, 9_999.0, 0.1),
        ];
        for (at, at_score, below, below_score) in cases {
            assert_eq!(whale_score(at, SUPPLY), at_score, "at {at}");
            assert_eq!(whale_score(below, SUPPLY), below_score, "below {at}");
        }
        assert_eq!(whale_score(1.0, SUPPLY), WHALE_FLOOR_SCORE);
        assert_eq!(whale_score(SUPPLY * 2.0, SUPPLY), 1.0);
    }

    #[test]
    fn test_whale_score_monotonic() {
        let mut last = 0.0;
        let mut balance = 1.0;
        while balance < SUPPLY {
            let score = whale_score(balance, SUPPLY);
            assert!(score >= last, "score dropped at balance {balance}");
            last = score;
            balance *= 1.7;
        }
    }

    #[test]
    fn test_risk_factor_empty_is_neutral() {
        assert_eq!(risk_factor(&[], 0.0), 0.5);
        assert_eq!(risk_factor(&[], 1_000_000.0), 0.5);
    }

    #[test]
    fn test_risk_factor_low_risk_wallet() {
        // 10 small transfers to 10 distinct peers: 0.3, 0.3, 0.3
        let txs: Vec<_> = (0..10).map(|i| tx(1.0, &format!("sei1peer{i}"))).collect();
        let r = risk_factor(&txs, 1_000.0);
        assert!((r - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_risk_factor_high_frequency_single_counterparty() {
        // 1200 tx, one peer, each tx > 50% of balance: 0.8, 0.7, 0.8
        let txs: Vec<_> = (0..1200).map(|_| tx(60.0, "sei1same")).collect();
        let r = risk_factor(&txs, 100.0);
        assert!((r - (0.8 + 0.7 + 0.8) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_risk_factor_mean_amount_band() {
        // max 40 (< 50), mean 20 (> 10) with balance 100 → 0.6
        let txs = vec![tx(40.0, "a"), tx(10.0, "b"), tx(10.0, "c")];
        let r = risk_factor(&txs, 100.0);
        // frequency 0.3, concentration 0.6, diversity 3/3 → 0.3
        assert!((r - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_influence_empty_is_baseline() {
        assert_eq!(influence_score(&[], 0.0), 0.1);
        assert_eq!(influence_score(&[], 5_000.0), 0.1);
    }

    #[test]
    fn test_influence_zero_balance_skips_volume_term() {
        let txs = vec![tx(1_000.0, "sei1a")];
        let score = influence_score(&txs, 0.0);
        // activity 1/1000*0.3 + network 1/100*0.3
        assert!((score - (0.0003 + 0.003)).abs() < 1e-12);
        assert!(score.is_finite());
    }

    #[test]
    fn test_influence_saturates_at_one() {
        let txs: Vec<_> = (0..2000).map(|i| tx(1_000.0, &format!("sei1p{i}"))).collect();
        assert!((influence_score(&txs, 10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overall_score_weights() {
        let s = overall_score(0.7, 0.5, 0.1, &OverallWeights::STANDARD);
        assert!((s - 0.40).abs() < 1e-12);

        let live = overall_score(0.7, 0.5, 0.1, &OverallWeights::LIVE);
        assert!((live - (0.28 + 0.15 + 0.03)).abs() < 1e-12);
    }

    #[test]
    fn test_overall_score_bounds() {
        for weights in [OverallWeights::STANDARD, OverallWeights::LIVE] {
            assert!((weights.total() - 1.0).abs() < 1e-12);
            for w in [0.0, 0.5, 1.0] {
                for r in [0.0, 0.5, 1.0] {
                    for i in [0.0, 0.5, 1.0] {
                        let s = overall_score(w, r, i, &weights);
                        assert!((0.0..=1.0).contains(&s));
                    }
                }
            }
        }
    }
}
