//! Validation of raw JSON arguments into engine inputs.

use serde_json::{Map, Value};

use crate::errors::AnalyzerError;
use crate::models::{Direction, TransactionRecord, TxStatus, WalletSnapshot};
use crate::sei::validate_address;

/// Where a wallet to analyze comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletSource {
    /// Caller supplied balance and history.
    Provided(WalletSnapshot),
    /// Resolve the address against the chain.
    Live(String),
}

/// Accepts `{walletData: {...}}`, a bare walletData object, or `{address}`.
pub fn wallet_source(args: &Value) -> Result<WalletSource, AnalyzerError> {
    let obj = as_object(args, "arguments")?;

    if let Some(data) = obj.get("walletData") {
        return wallet_snapshot(data).map(WalletSource::Provided);
    }
    if obj.contains_key("balance") || obj.contains_key("transactions") {
        return wallet_snapshot(args).map(WalletSource::Provided);
    }

    match obj.get("address") {
        Some(Value::String(address)) => Ok(WalletSource::Live(validate_address(address)?.to_string())),
        Some(_) => Err(AnalyzerError::invalid("address must be a string")),
        None => Err(AnalyzerError::invalid("walletData or address is required")),
    }
}

/// Wallets named in a compare call: `addresses` or `addressData.addresses`,
/// each an address string or a walletData object.
pub fn comparison_sources(args: &Value) -> Result<Vec<WalletSource>, AnalyzerError> {
    let obj = as_object(args, "arguments")?;

    let list = obj
        .get("addresses")
        .or_else(|| obj.get("addressData").and_then(|d| d.get("addresses")))
        .ok_or_else(|| AnalyzerError::invalid("addresses is required"))?
        .as_array()
        .ok_or_else(|| AnalyzerError::invalid("addresses must be an array"))?;

    if list.len() < 2 {
        return Err(AnalyzerError::InsufficientInput(
            "At least 2 addresses required for comparison".into(),
        ));
    }

    list.iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(address) => Ok(WalletSource::Live(validate_address(address)?.to_string())),
            Value::Object(_) => wallet_snapshot(item).map(WalletSource::Provided),
            _ => Err(AnalyzerError::invalid(format!(
                "addresses[{i}] must be an address string or a walletData object"
            ))),
        })
        .collect()
}

pub fn wallet_snapshot(data: &Value) -> Result<WalletSnapshot, AnalyzerError> {
    let obj = as_object(data, "walletData")?;

    let address = match obj.get("address") {
        Some(Value::String(a)) if !a.trim().is_empty() => a.trim().to_string(),
        _ => return Err(AnalyzerError::invalid("walletData.address is required")),
    };

    let balance = non_negative(obj.get("balance"), "walletData.balance")?;

    let transactions = match obj.get("transactions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, tx)| transaction(i, tx))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(AnalyzerError::invalid("walletData.transactions must be an array")),
    };

    Ok(WalletSnapshot::new(address, balance, transactions))
}

/// One raw transaction. `type` doubles as direction ("incoming"/"outgoing")
/// or as category ("staking", ...) depending on the producer.
fn transaction(index: usize, raw: &Value) -> Result<TransactionRecord, AnalyzerError> {
    let field = |name: &str| format!("transactions[{index}].{name}");
    let obj = as_object(raw, &format!("transactions[{index}]"))?;

    let amount = non_negative(obj.get("amount"), &field("amount"))?;
    let type_tag = optional_str(obj, "type", &field("type"))?;

    let direction = match optional_str(obj, "direction", &field("direction"))? {
        Some(d) => Direction::from_api_str(&d),
        None => type_tag
            .as_deref()
            .map(Direction::from_api_str)
            .unwrap_or_default(),
    };

    let kind = match (
        optional_str(obj, "kind", &field("kind"))?,
        optional_str(obj, "tx_type", &field("tx_type"))?,
    ) {
        (Some(k), _) | (None, Some(k)) => k,
        (None, None) => type_tag
            .filter(|t| Direction::from_api_str(t) == Direction::Unknown)
            .unwrap_or_default(),
    };

    let status = optional_str(obj, "status", &field("status"))?
        .map(|s| TxStatus::from_api_str(&s))
        .unwrap_or_default();

    let mut tx = TransactionRecord::new(amount, direction, kind).with_status(status);
    tx.counterparty = optional_str(obj, "counterparty", &field("counterparty"))?;
    tx.sender = optional_str(obj, "from", &field("from"))?;
    tx.recipient = optional_str(obj, "to", &field("to"))?;
    tx.hash = optional_str(obj, "hash", &field("hash"))?;
    tx.timestamp = optional_str(obj, "timestamp", &field("timestamp"))?;
    tx.height = obj.get("height").and_then(|h| match h {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    });
    tx.fee = obj.get("fee").and_then(number).filter(|f| f.is_finite() && *f >= 0.0);
    Ok(tx)
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, AnalyzerError> {
    value
        .as_object()
        .ok_or_else(|| AnalyzerError::invalid(format!("{what} must be a JSON object")))
}

/// Number or numeric string.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Absent or null reads as zero; anything else must be a finite, non-negative number.
fn non_negative(value: Option<&Value>, what: &str) -> Result<f64, AnalyzerError> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(v) => match number(v) {
            Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
            _ => Err(AnalyzerError::invalid(format!(
                "{what} must be a non-negative number"
            ))),
        },
    }
}

fn optional_str(
    obj: &Map<String, Value>,
    key: &str,
    what: &str,
) -> Result<Option<String>, AnalyzerError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AnalyzerError::invalid(format!("{what} must be a string"))),
    }
}
