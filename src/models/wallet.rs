use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Direction, TxStatus};

/// A single transaction as seen from the analyzed wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: f64,
    #[serde(default)]
    pub direction: Direction,
    /// Free-form category, e.g. "staking", "governance", "transfer", "rewards".
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(default, rename = "from", skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, rename = "to", skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default)]
    pub status: TxStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

impl TransactionRecord {
    /// Minimal record; the remaining fields default to unknown/absent.
    pub fn new(amount: f64, direction: Direction, kind: impl Into<String>) -> Self {
        Self {
            amount,
            direction,
            kind: kind.into(),
            counterparty: None,
            sender: None,
            recipient: None,
            status: TxStatus::Unknown,
            hash: None,
            height: None,
            timestamp: None,
            fee: None,
        }
    }

    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    pub fn with_status(mut self, status: TxStatus) -> Self {
        self.status = status;
        self
    }

    /// Every address field present on this record (from, to, counterparty).
    pub fn parties(&self) -> impl Iterator<Item = &str> {
        [&self.sender, &self.recipient, &self.counterparty]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
    }

    /// Addresses this record sends value to: the explicit recipient and the counterparty.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        [&self.recipient, &self.counterparty]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
    }

    pub fn is_staking(&self) -> bool {
        self.kind.to_lowercase().contains("staking")
    }

    pub fn is_rewards(&self) -> bool {
        self.kind.eq_ignore_ascii_case("rewards")
    }
}

/// Immutable input to the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: String,
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

impl WalletSnapshot {
    pub fn new(address: impl Into<String>, balance: f64, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            address: address.into(),
            balance,
            transactions,
        }
    }

    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Distinct non-empty addresses across from/to/counterparty of all records.
pub fn unique_counterparties(transactions: &[TransactionRecord]) -> usize {
    transactions
        .iter()
        .flat_map(TransactionRecord::parties)
        .collect::<HashSet<_>>()
        .len()
}
