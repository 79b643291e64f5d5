use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::rpc;
use crate::AppState;

/// POST /mcp. Protocol failures come back as 200 with an error envelope;
/// notifications get 202 and no body.
pub async fn handle(State(state): State<AppState>, body: String) -> Response {
    match rpc::handle_text(&state, &body).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
