use super::stats;
use crate::models::{Direction, PatternSummary, TransactionRecord};

pub const NO_ACTIVITY: &str = "no_activity";
pub const HIGH_FREQUENCY_TRADER: &str = "high_frequency_trader";
pub const ACCUMULATOR: &str = "accumulator";
pub const DISTRIBUTOR: &str = "distributor";
pub const IRREGULAR_AMOUNTS: &str = "irregular_amounts";
pub const REGULAR_USER: &str = "regular_user";

/// Summarize amount and direction statistics and tag the dominant pattern.
///
/// Precedence: high frequency (>1000 tx), accumulator (incoming > 2x
/// outgoing), distributor (outgoing > 2x incoming), irregular amounts
/// (mean > 3x median), otherwise regular.
pub fn transaction_patterns(transactions: &[TransactionRecord]) -> PatternSummary {
    if transactions.is_empty() {
        return PatternSummary {
            primary_pattern: NO_ACTIVITY.into(),
            description: Some("No transactions found".into()),
            transaction_count: 0,
            average_amount: 0.0,
            median_amount: 0.0,
            max_amount: 0.0,
            min_amount: 0.0,
            incoming_ratio: 0.0,
            outgoing_ratio: 0.0,
        };
    }

    let tx_count = transactions.len();
    let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();
    let average = stats::mean(&amounts);
    let median = stats::median(&amounts);

    let incoming = transactions
        .iter()
        .filter(|t| t.direction == Direction::Incoming)
        .count();
    let outgoing = transactions
        .iter()
        .filter(|t| t.direction == Direction::Outgoing)
        .count();

    let pattern = if tx_count > 1000 {
        HIGH_FREQUENCY_TRADER
    } else if incoming > outgoing * 2 {
        ACCUMULATOR
    } else if outgoing > incoming * 2 {
        DISTRIBUTOR
    } else if average > median * 3.0 {
        IRREGULAR_AMOUNTS
    } else {
        REGULAR_USER
    };

    PatternSummary {
        primary_pattern: pattern.into(),
        description: None,
        transaction_count: tx_count,
        average_amount: average,
        median_amount: median,
        max_amount: stats::max(&amounts),
        min_amount: stats::min(&amounts),
        incoming_ratio: incoming as f64 / tx_count as f64,
        outgoing_ratio: outgoing as f64 / tx_count as f64,
    }
}
