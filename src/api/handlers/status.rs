use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::rpc::SERVER_NAME;
use crate::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Sei wallet analyzer",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/metrics",
            "/analyze/wallet",
            "/analyze/compare",
            "/network/health",
            "/network/stats",
            "/account/:address",
            "/transactions/:address",
            "/servers",
            "/mcp"
        ],
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": SERVER_NAME }))
}

/// Prometheus scrape payload.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], state.metrics_handle.render())
}
