use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AnalyzerError;
use crate::models::AccountInfo;
use crate::tools::{self, TransactionList};
use crate::AppState;

const DEFAULT_PAGE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    pub limit: Option<usize>,
}

pub async fn detail(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountInfo>, AnalyzerError> {
    Ok(Json(tools::account(&state, &address).await?))
}

/// GET /transactions/:address?limit=N, capped at 200.
pub async fn transactions(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<TransactionList>, AnalyzerError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE);
    Ok(Json(tools::transactions(&state, &address, limit).await?))
}
