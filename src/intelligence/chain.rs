use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::{ChainMetrics, TransactionRecord};

/// Decides whether an address looks like a DeFi contract / chain account.
#[derive(Clone)]
pub struct AddressPredicate {
    label: String,
    check: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl AddressPredicate {
    pub fn new(label: impl Into<String>, check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            check: Arc::new(check),
        }
    }

    /// Matches addresses starting with `prefix` (e.g. bech32 `sei1`).
    pub fn prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let label = format!("prefix:{prefix}");
        Self::new(label, move |addr: &str| !prefix.is_empty() && addr.starts_with(prefix.as_str()))
    }

    pub fn matches(&self, address: &str) -> bool {
        (self.check)(address)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for AddressPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressPredicate").field("label", &self.label).finish()
    }
}

/// Staking reward constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardParams {
    pub inflation_rate: f64,
    /// Portion of inflation that reaches delegators.
    pub reward_share: f64,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            inflation_rate: 0.08,
            reward_share: 0.85,
        }
    }
}

const BASE_CHAIN_SCORE: f64 = 0.5;
const ACTIVE_TX_THRESHOLD: usize = 50;

/// Staking, DeFi and activity metrics specific to the chain.
pub fn chain_specific_metrics(
    transactions: &[TransactionRecord],
    defi_address: &AddressPredicate,
    rewards: &RewardParams,
) -> ChainMetrics {
    let staking: Vec<&TransactionRecord> = transactions.iter().filter(|t| t.is_staking()).collect();
    let staking_amount: f64 = staking.iter().map(|t| t.amount).sum();

    let defi_participation = transactions
        .iter()
        .any(|t| t.destinations().any(|addr| defi_address.matches(addr)));

    let mut chain_score = BASE_CHAIN_SCORE;
    if staking_amount > 0.0 {
        chain_score += 0.2;
    }
    if defi_participation {
        chain_score += 0.2;
    }
    if transactions.len() > ACTIVE_TX_THRESHOLD {
        chain_score += 0.1;
    }

    ChainMetrics {
        staking_amount,
        defi_participation,
        chain_score: chain_score.min(1.0),
        estimated_rewards: staking_amount * rewards.inflation_rate * rewards.reward_share,
        validator_interactions: staking.len(),
    }
}
