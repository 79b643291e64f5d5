use axum::extract::State;
use axum::Json;

use crate::errors::AnalyzerError;
use crate::models::{NetworkHealthReport, NetworkStats};
use crate::tools::{self, Report};
use crate::AppState;

pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<Report<NetworkHealthReport>>, AnalyzerError> {
    Ok(Json(tools::analyze_network_health(&state).await?))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Report<NetworkStats>>, AnalyzerError> {
    Ok(Json(tools::network_stats(&state).await?))
}
