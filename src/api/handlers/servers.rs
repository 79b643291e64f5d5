use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Value> {
    match &state.servers {
        Some(discovery) => Json(json!({
            "configured": true,
            "source": discovery.path().display().to_string(),
            "servers": discovery.list_servers(),
        })),
        None => Json(json!({ "configured": false, "servers": {} })),
    }
}
