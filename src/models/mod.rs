pub mod analysis;
pub mod network;
pub mod wallet;

pub use analysis::{
    ActivitySummary, AddressComparison, ChainMetrics, ComparisonInsights, ComparisonResult,
    ComparisonSummary, PatternSummary, RiskAssessment, RiskLevel, Scores, WalletAnalysis,
    WalletMetrics,
};
pub use network::{AccountInfo, CoinBalance, HealthStatus, NetworkAnalysis, NetworkHealthReport, NetworkStats};
pub use wallet::{TransactionRecord, WalletSnapshot};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Flow of a transaction relative to the analyzed wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
    #[default]
    Unknown,
}

impl Direction {
    pub fn from_api_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "incoming" | "in" | "received" => Direction::Incoming,
            "outgoing" | "out" | "sent" => Direction::Outgoing,
            _ => Direction::Unknown,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => write!(f, "incoming"),
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// TxStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
    #[default]
    Unknown,
}

impl TxStatus {
    pub fn from_api_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "success" | "ok" | "succeeded" => TxStatus::Success,
            "failed" | "failure" | "error" => TxStatus::Failed,
            _ => TxStatus::Unknown,
        }
    }

    /// Cosmos SDK convention: code 0 is success, anything else failed.
    pub fn from_code(code: u32) -> Self {
        if code == 0 {
            TxStatus::Success
        } else {
            TxStatus::Failed
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Success => write!(f, "success"),
            TxStatus::Failed => write!(f, "failed"),
            TxStatus::Unknown => write!(f, "unknown"),
        }
    }
}
