use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let service = Router::new()
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health_check))
        .route("/metrics", get(handlers::status::render_metrics))
        .route("/servers", get(handlers::servers::list));

    let analysis = Router::new()
        .route("/analyze/wallet", post(handlers::analyze::wallet))
        .route("/analyze/compare", post(handlers::analyze::compare))
        .route("/network/health", get(handlers::network::health))
        .route("/network/stats", get(handlers::network::stats))
        .route("/account/:address", get(handlers::account::detail))
        .route("/transactions/:address", get(handlers::account::transactions))
        .route("/mcp", post(handlers::mcp::handle));

    // Read-only scoring API, no credentials involved.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    service
        .merge(analysis)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
