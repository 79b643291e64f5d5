use serde::{Deserialize, Serialize};

use crate::models::wallet::unique_counterparties;
use crate::models::{RiskAssessment, RiskLevel, TransactionRecord};

pub const FACTOR_HIGH_FREQUENCY: &str = "High transaction frequency";
pub const FACTOR_LIMITED_COUNTERPARTIES: &str = "Limited counterparties";
pub const FACTOR_LARGE_AMOUNTS: &str = "Large transaction amounts";

pub const REC_WASH_TRADING: &str = "Monitor for wash trading";
pub const REC_MARKET_MAKER: &str = "Potential market maker";
pub const REC_NETWORK_PARTICIPANT: &str = "Strong network participant";
pub const REC_VALIDATOR_PROGRAM: &str = "Consider for validator program";
pub const REC_HIGH_VALUE: &str = "High-value wallet - monitor for large movements";
pub const REC_ACTIVE_STAKER: &str = "Active staker - earning rewards";
pub const REC_CONSIDER_STAKING: &str = "Consider staking for rewards";
pub const REC_HIGH_FAILURE_RATE: &str = "High transaction failure rate";

pub fn risk_level(risk_factor: f64) -> RiskLevel {
    if risk_factor > 0.7 {
        RiskLevel::High
    } else if risk_factor > 0.4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Level plus the human-readable factors that triggered, in fixed order.
pub fn risk_assessment(
    risk_factor: f64,
    transactions: &[TransactionRecord],
    balance: f64,
) -> RiskAssessment {
    let tx_count = transactions.len();
    let mut factors = Vec::new();

    if tx_count > 1000 {
        factors.push(FACTOR_HIGH_FREQUENCY.to_string());
    }
    if (unique_counterparties(transactions) as f64) < tx_count as f64 * 0.1 {
        factors.push(FACTOR_LIMITED_COUNTERPARTIES.to_string());
    }
    if transactions.iter().any(|t| t.amount > balance * 0.5) {
        factors.push(FACTOR_LARGE_AMOUNTS.to_string());
    }

    RiskAssessment {
        level: risk_level(risk_factor),
        factors,
    }
}

/// Inputs to the advisory rules.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInput {
    pub whale_score: f64,
    pub risk_factor: f64,
    pub influence_score: f64,
    pub balance: f64,
    pub tx_count: usize,
    pub failed_tx_count: usize,
    pub chain_score: f64,
    pub staking_amount: f64,
    pub staking_tx_count: usize,
}

/// One advisory rule: a condition plus the text emitted when it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    WashTrading,
    MarketMaker,
    NetworkParticipant,
    ValidatorProgram,
    HighValueWallet,
    ActiveStaker,
    ConsiderStaking,
    HighFailureRate,
}

impl Recommendation {
    pub fn text(&self) -> &'static str {
        match self {
            Recommendation::WashTrading => REC_WASH_TRADING,
            Recommendation::MarketMaker => REC_MARKET_MAKER,
            Recommendation::NetworkParticipant => REC_NETWORK_PARTICIPANT,
            Recommendation::ValidatorProgram => REC_VALIDATOR_PROGRAM,
            Recommendation::HighValueWallet => REC_HIGH_VALUE,
            Recommendation::ActiveStaker => REC_ACTIVE_STAKER,
            Recommendation::ConsiderStaking => REC_CONSIDER_STAKING,
            Recommendation::HighFailureRate => REC_HIGH_FAILURE_RATE,
        }
    }

    pub fn applies(&self, input: &RecommendationInput) -> bool {
        match self {
            Recommendation::WashTrading => input.risk_factor > 0.8,
            Recommendation::MarketMaker => input.influence_score > 0.8 && input.tx_count > 500,
            Recommendation::NetworkParticipant => input.chain_score > 0.8,
            Recommendation::ValidatorProgram => input.staking_amount > 1_000_000.0,
            Recommendation::HighValueWallet => input.whale_score > 0.7,
            Recommendation::ActiveStaker => input.staking_tx_count > 5,
            Recommendation::ConsiderStaking => input.staking_tx_count == 0 && input.balance > 1_000.0,
            Recommendation::HighFailureRate => {
                input.failed_tx_count as f64 > input.tx_count as f64 * 0.1
            }
        }
    }
}

/// Ordered advisory rules. Each is evaluated independently; output keeps rule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub rules: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn standard() -> Self {
        use Recommendation::*;
        Self {
            rules: vec![WashTrading, MarketMaker, NetworkParticipant, ValidatorProgram],
        }
    }

    /// Holder-facing advice used for wallets resolved from live chain data.
    pub fn live() -> Self {
        use Recommendation::*;
        Self {
            rules: vec![HighValueWallet, ActiveStaker, ConsiderStaking, HighFailureRate],
        }
    }

    pub fn evaluate(&self, input: &RecommendationInput) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.applies(input))
            .map(|rule| rule.text().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    #[test]
    fn test_risk_levels() {
        assert_eq!(risk_level(0.71), RiskLevel::High);
        assert_eq!(risk_level(0.7), RiskLevel::Medium);
        assert_eq!(risk_level(0.41), RiskLevel::Medium);
        assert_eq!(risk_level(0.4), RiskLevel::Low);
        assert_eq!(risk_level(0.5), RiskLevel::Medium);
    }

    #[test]
    fn test_no_transactions_no_factors() {
        let a = risk_assessment(0.5, &[], 100.0);
        assert_eq!(a.level, RiskLevel::Medium);
        assert!(a.factors.is_empty());
    }

    #[test]
    fn test_all_factors_in_order() {
        let txs: Vec<_> = (0..1001)
            .map(|_| TransactionRecord::new(80.0, Direction::Outgoing, "transfer").with_counterparty("sei1x"))
            .collect();
        let a = risk_assessment(0.8, &txs, 100.0);
        assert_eq!(a.level, RiskLevel::High);
        assert_eq!(
            a.factors,
            vec![FACTOR_HIGH_FREQUENCY, FACTOR_LIMITED_COUNTERPARTIES, FACTOR_LARGE_AMOUNTS]
        );
    }

    #[test]
    fn test_diverse_small_wallet_has_no_factors() {
        let txs: Vec<_> = (0..5)
            .map(|i| TransactionRecord::new(1.0, Direction::Incoming, "transfer").with_counterparty(format!("sei1p{i}")))
            .collect();
        assert!(risk_assessment(0.3, &txs, 100.0).factors.is_empty());
    }

    fn quiet() -> RecommendationInput {
        RecommendationInput {
            whale_score: 0.1,
            risk_factor: 0.3,
            influence_score: 0.9,
            balance: 1_000.0,
            tx_count: 500,
            failed_tx_count: 50,
            chain_score: 0.8,
            staking_amount: 1_000_000.0,
            staking_tx_count: 3,
        }
    }

    #[test]
    fn test_recommendations_independent_and_ordered() {
        let standard = RecommendationSet::standard();
        assert!(standard.evaluate(&quiet()).is_empty());

        let all = RecommendationInput {
            risk_factor: 0.81,
            influence_score: 0.81,
            tx_count: 501,
            chain_score: 0.9,
            staking_amount: 1_000_001.0,
            ..quiet()
        };
        assert_eq!(
            standard.evaluate(&all),
            vec![REC_WASH_TRADING, REC_MARKET_MAKER, REC_NETWORK_PARTICIPANT, REC_VALIDATOR_PROGRAM]
        );

        let some = RecommendationInput { risk_factor: 0.1, chain_score: 0.1, ..all };
        assert_eq!(standard.evaluate(&some), vec![REC_MARKET_MAKER, REC_VALIDATOR_PROGRAM]);
    }

    #[test]
    fn test_live_recommendations() {
        let live = RecommendationSet::live();
        assert!(live.evaluate(&quiet()).is_empty());

        let whale_staker = RecommendationInput {
            whale_score: 0.71,
            staking_tx_count: 6,
            failed_tx_count: 51,
            ..quiet()
        };
        assert_eq!(
            live.evaluate(&whale_staker),
            vec![REC_HIGH_VALUE, REC_ACTIVE_STAKER, REC_HIGH_FAILURE_RATE]
        );

        let idle_holder = RecommendationInput {
            balance: 1_000.5,
            staking_tx_count: 0,
            ..quiet()
        };
        assert_eq!(live.evaluate(&idle_holder), vec![REC_CONSIDER_STAKING]);

        let empty = RecommendationInput { tx_count: 0, failed_tx_count: 0, ..quiet() };
        assert!(!Recommendation::HighFailureRate.applies(&empty));
    }
}
