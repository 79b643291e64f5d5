use super::assessment::{risk_assessment, RecommendationInput};
use super::chain::{chain_specific_metrics, AddressPredicate};
use super::classifier::ClassificationInput;
use super::comparator;
use super::network::score_network;
use super::patterns::transaction_patterns;
use super::policy::{ChainParams, ScoringPolicy};
use super::scorer::{influence_score, overall_score, risk_factor, supply_percentage, whale_score};
use super::stats::round3;
use crate::errors::AnalyzerError;
use crate::models::{
    ActivitySummary, ComparisonResult, NetworkHealthReport, NetworkStats, Scores, TxStatus,
    WalletAnalysis, WalletMetrics, WalletSnapshot,
};

/// Leading records echoed back in the analysis; fetched lists are newest first.
pub const RECENT_TRANSACTIONS: usize = 5;

/// Pure wallet scoring. Holds only constants; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    policy: ScoringPolicy,
    chain: ChainParams,
    defi_address: AddressPredicate,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(
            ScoringPolicy::standard(),
            ChainParams::default(),
            AddressPredicate::prefix("sei1"),
        )
    }
}

impl ScoringEngine {
    pub fn new(policy: ScoringPolicy, chain: ChainParams, defi_address: AddressPredicate) -> Self {
        Self {
            policy,
            chain,
            defi_address,
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn chain(&self) -> &ChainParams {
        &self.chain
    }

    /// Same constants under a different policy.
    pub fn with_policy(&self, policy: ScoringPolicy) -> Self {
        Self {
            policy,
            ..self.clone()
        }
    }

    pub fn score_wallet(&self, snapshot: &WalletSnapshot) -> WalletAnalysis {
        let txs = &snapshot.transactions;
        let balance = snapshot.balance;
        let tx_count = txs.len();

        let whale = whale_score(balance, self.chain.total_supply);
        let risk = risk_factor(txs, balance);
        let influence = influence_score(txs, balance);
        let overall = overall_score(whale, risk, influence, &self.policy.weights);

        let patterns = transaction_patterns(txs);
        let chain = chain_specific_metrics(txs, &self.defi_address, &self.chain.rewards);

        let classification = self.policy.classification.classify(&ClassificationInput {
            whale_score: whale,
            influence_score: influence,
            defi_participation: chain.defi_participation,
            staking_amount: chain.staking_amount,
            staking_tx_count: chain.validator_interactions,
            tx_count,
        });

        let risk_assessment = risk_assessment(risk, txs, balance);
        let failed_transactions = txs.iter().filter(|t| t.status == TxStatus::Failed).count();
        let recommendations = self.policy.recommendations.evaluate(&RecommendationInput {
            whale_score: whale,
            risk_factor: risk,
            influence_score: influence,
            balance,
            tx_count,
            failed_tx_count: failed_transactions,
            chain_score: chain.chain_score,
            staking_amount: chain.staking_amount,
            staking_tx_count: chain.validator_interactions,
        });

        let activity = ActivitySummary {
            successful_transactions: txs.iter().filter(|t| t.status == TxStatus::Success).count(),
            failed_transactions,
            total_volume: txs.iter().map(|t| t.amount).sum(),
            staking_transactions: chain.validator_interactions,
            reward_transactions: txs.iter().filter(|t| t.is_rewards()).count(),
            latest_transaction: txs.first().and_then(|t| t.timestamp.clone()),
        };

        WalletAnalysis {
            address: snapshot.address.clone(),
            policy: self.policy.name.to_string(),
            classification,
            scores: Scores {
                whale_score: round3(whale),
                risk_factor: round3(risk),
                influence_score: round3(influence),
                overall_score: round3(overall),
                chain_score: round3(chain.chain_score),
            },
            wallet_metrics: WalletMetrics {
                balance,
                transaction_count: tx_count,
                estimated_usd_value: balance * self.chain.price_usd,
                balance_percentage_of_supply: supply_percentage(balance, self.chain.total_supply),
            },
            transaction_patterns: patterns,
            activity,
            chain_specific_metrics: chain,
            risk_assessment,
            recommendations,
            recent_transactions: txs.iter().take(RECENT_TRANSACTIONS).cloned().collect(),
        }
    }

    pub fn compare(&self, analyses: &[WalletAnalysis]) -> Result<ComparisonResult, AnalyzerError> {
        comparator::compare(analyses)
    }

    pub fn score_network(&self, stats: &NetworkStats) -> NetworkHealthReport {
        score_network(stats, self.policy.health_model)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
