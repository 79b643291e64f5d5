use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::errors::AnalyzerError;
use crate::models::{ComparisonResult, WalletAnalysis};
use crate::tools::{self, Report};
use crate::AppState;

/// Malformed bodies are input errors like any other.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AnalyzerError> {
    body.map(|Json(v)| v)
        .map_err(|e| AnalyzerError::invalid(format!("request body must be JSON: {}", e.body_text())))
}

/// POST /analyze/wallet: walletData (wrapped or bare) or `{address}`.
pub async fn wallet(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Report<WalletAnalysis>>, AnalyzerError> {
    let args = json_body(body)?;
    let report = tools::analyze_wallet(&state, &args).await?;
    Ok(Json(report))
}

/// POST /analyze/compare with `{addresses: [...]}`.
pub async fn compare(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Report<ComparisonResult>>, AnalyzerError> {
    let args = json_body(body)?;
    let report = tools::compare_addresses(&state, &args).await?;
    Ok(Json(report))
}
