use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::rpc::codes;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// Missing or malformed address / wallet data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Comparison requested with fewer than two usable wallets.
    #[error("Insufficient input: {0}")]
    InsufficientInput(String),

    /// Every upstream endpoint failed.
    #[error("Network error: {0}")]
    Network(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AnalyzerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AnalyzerError::InvalidInput(msg.into())
    }

    /// JSON-RPC error code for this failure.
    pub fn rpc_code(&self) -> i64 {
        match self {
            AnalyzerError::InvalidInput(_) | AnalyzerError::InsufficientInput(_) => {
                codes::INVALID_PARAMS
            }
            AnalyzerError::Network(_) | AnalyzerError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Message safe to hand back to callers; internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AnalyzerError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "Internal server error".into()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalyzerError::InvalidInput(_) | AnalyzerError::InsufficientInput(_) => {
                StatusCode::BAD_REQUEST
            }
            AnalyzerError::Network(_) => StatusCode::BAD_GATEWAY,
            AnalyzerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
