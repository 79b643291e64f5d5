use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::CoinBalance;

// ---------------------------------------------------------------------------
// Bank / Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BalancesResponse {
    #[serde(default)]
    pub balances: Vec<CoinBalance>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub account: Option<ApiAccount>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiAccount {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub sequence: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SupplyResponse {
    #[serde(default)]
    pub amount: Option<CoinBalance>,
}

// ---------------------------------------------------------------------------
// Tx search
// ---------------------------------------------------------------------------

/// `cosmos/tx/v1beta1/txs`. Newer gateways put results in `tx_responses`;
/// some older ones return response-shaped entries under `txs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxSearchResponse {
    #[serde(default)]
    pub txs: Vec<Value>,
    #[serde(default)]
    pub tx_responses: Vec<TxResponse>,
}

impl TxSearchResponse {
    pub fn into_responses(self) -> Vec<TxResponse> {
        if !self.tx_responses.is_empty() {
            return self.tx_responses;
        }
        self.txs
            .into_iter()
            .filter_map(|v| serde_json::from_value::<TxResponse>(v).ok())
            .filter(|r| !r.txhash.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub txhash: String,
    /// Height arrives as a string on most gateways and a number on some.
    #[serde(default)]
    pub height: Value,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub logs: Vec<TxLog>,
    #[serde(default)]
    pub events: Vec<TxEvent>,
    #[serde(default)]
    pub tx: Option<TxEnvelope>,
}

impl TxResponse {
    pub fn height_u64(&self) -> Option<u64> {
        match &self.height {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Log events when present, otherwise the top-level event list.
    pub fn all_events(&self) -> Vec<&TxEvent> {
        let from_logs: Vec<&TxEvent> = self.logs.iter().flat_map(|l| l.events.iter()).collect();
        if from_logs.is_empty() {
            self.events.iter().collect()
        } else {
            from_logs
        }
    }

    /// `@type` of the first message in the body.
    pub fn first_message_type(&self) -> Option<&str> {
        self.tx
            .as_ref()?
            .body
            .as_ref()?
            .messages
            .first()?
            .get("@type")?
            .as_str()
    }

    pub fn first_fee_amount(&self) -> Option<&str> {
        self.tx
            .as_ref()?
            .auth_info
            .as_ref()?
            .fee
            .as_ref()?
            .amount
            .first()
            .map(|c| c.amount.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxLog {
    #[serde(default)]
    pub events: Vec<TxEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventAttribute {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxEnvelope {
    #[serde(default)]
    pub body: Option<TxBody>,
    #[serde(default)]
    pub auth_info: Option<AuthInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxBody {
    #[serde(default)]
    pub messages: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthInfo {
    #[serde(default)]
    pub fee: Option<Fee>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fee {
    #[serde(default)]
    pub amount: Vec<CoinBalance>,
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockResponse {
    #[serde(default)]
    pub block: Option<ApiBlock>,
}

impl BlockResponse {
    pub fn header(&self) -> Option<&BlockHeader> {
        self.block.as_ref()?.header.as_ref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiBlock {
    #[serde(default)]
    pub header: Option<BlockHeader>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidatorsResponse {
    #[serde(default)]
    pub validators: Vec<Value>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolResponse {
    #[serde(default)]
    pub pool: Option<StakingPool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StakingPool {
    #[serde(default)]
    pub bonded_tokens: String,
    #[serde(default)]
    pub not_bonded_tokens: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InflationResponse {
    #[serde(default)]
    pub inflation: Option<String>,
}
