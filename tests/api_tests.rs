mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use sei_analyzer::api::router::create_router;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post(app, uri, body.to_string()).await
}

// ---------------------------------------------------------------------------
// Service routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_root_and_health() {
    let (status, json) = get(common::build_test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "running");

    let (status, json) = get(common::build_test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let resp = common::build_test_app()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_servers_unconfigured() {
    let (status, json) = get(common::build_test_app(), "/servers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["configured"], false);
    assert!(json["servers"].as_object().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Wallet analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_analyze_provided_wallet() {
    let body = json!({
        "walletData": { "address": "sei1offline", "balance": 5_000_000, "transactions": [] }
    });
    let (status, json) = post_json(common::build_test_app(), "/analyze/wallet", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_source"], "provided");
    assert_eq!(json["address"], "sei1offline");
    assert_eq!(json["scores"]["whale_score"], 0.7);
    assert_eq!(json["scores"]["risk_factor"], 0.5);
    assert_eq!(json["scores"]["influence_score"], 0.1);
    assert_eq!(json["scores"]["overall_score"], 0.4);
    assert_eq!(json["classification"], "Large Holder");
    assert!(json["analysis_timestamp"].is_string());
}

#[tokio::test]
async fn test_analyze_live_wallet() {
    let (status, json) = post_json(
        common::build_test_app(),
        "/analyze/wallet",
        json!({ "address": "sei1trader" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_source"], "live");
    assert_eq!(json["wallet_metrics"]["transaction_count"], 20);
}

#[tokio::test]
async fn test_analyze_rejects_negative_balance() {
    let body = json!({ "walletData": { "address": "sei1bad", "balance": -10 } });
    let (status, json) = post_json(common::build_test_app(), "/analyze/wallet", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("balance"));
}

#[tokio::test]
async fn test_analyze_rejects_malformed_body() {
    let (status, json) = post(common::build_test_app(), "/analyze/wallet", "{ nope".into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_analyze_unreachable_address_is_bad_gateway() {
    let (status, json) = post_json(
        common::build_test_app(),
        "/analyze/wallet",
        json!({ "address": "sei1unknown" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["success"], false);
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_compare_live_addresses() {
    let (status, json) = post_json(
        common::build_test_app(),
        "/analyze/compare",
        json!({ "addresses": ["sei1whale", "sei1small"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["comparison_summary"]["total_addresses"], 2);
    assert_eq!(json["comparison_summary"]["highest_whale_score"], 0.7);
    assert_eq!(json["individual_analysis"].as_array().unwrap().len(), 2);
    assert_eq!(json["data_source"], "live");
}

#[tokio::test]
async fn test_compare_skips_failed_fetches() {
    let (status, json) = post_json(
        common::build_test_app(),
        "/analyze/compare",
        json!({ "addresses": ["sei1whale", "sei1unknown", "sei1small"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["comparison_summary"]["total_addresses"], 2);
}

#[tokio::test]
async fn test_compare_insufficient_after_failures() {
    let (status, json) = post_json(
        common::build_test_app(),
        "/analyze/compare",
        json!({ "addresses": ["sei1whale", "sei1unknown"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_compare_mixed_sources() {
    let (status, json) = post_json(
        common::build_test_app(),
        "/analyze/compare",
        json!({ "addresses": ["sei1whale", { "address": "sei1offline", "balance": 5_000_000 }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_source"], "mixed");
    assert_eq!(json["insights"]["potential_connections"], "Manual review recommended");
}

// ---------------------------------------------------------------------------
// Network and account
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_network_health() {
    let (status, json) = get(common::build_test_app(), "/network/health").await;

    assert_eq!(status, StatusCode::OK);
    // composite: 1.0*0.3 + 0.65*0.4 + 1.0*0.3
    assert_eq!(json["overall_score"], 0.86);
    assert_eq!(json["status"], "Good");
    assert_eq!(json["metrics"]["chain_id"], "pacific-1");
}

#[tokio::test]
async fn test_network_health_unavailable() {
    let app = create_router(common::build_state(common::MockFetcher::default(), None));
    let (status, json) = get(app, "/network/health").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_network_stats() {
    let (status, json) = get(common::build_test_app(), "/network/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active_validators"], 40);
    assert_eq!(json["staking_ratio"], 0.65);
}

#[tokio::test]
async fn test_account_detail() {
    let (status, json) = get(common::build_test_app(), "/account/sei1whale").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["address"], "sei1whale");
    assert_eq!(json["balance_sei"], 5_000_000.0);
}

#[tokio::test]
async fn test_transactions_limit_is_capped() {
    let (status, json) = get(common::build_test_app(), "/transactions/sei1trader?limit=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["limit"], 200);
    assert_eq!(json["count"], 20);

    let (_, json) = get(common::build_test_app(), "/transactions/sei1trader?limit=5").await;
    assert_eq!(json["count"], 5);

    let (_, json) = get(common::build_test_app(), "/transactions/sei1trader").await;
    assert_eq!(json["limit"], 50);
}

// ---------------------------------------------------------------------------
// JSON-RPC over /mcp
// ---------------------------------------------------------------------------

async fn rpc(body: Value) -> (StatusCode, Value) {
    post_json(common::build_test_app(), "/mcp", body).await
}

#[tokio::test]
async fn test_mcp_initialize_and_list() {
    let (status, json) = rpc(json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], 1);
    assert_eq!(json["result"]["serverInfo"]["name"], "sei-analyzer");

    let (_, json) = rpc(json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })).await;
    let tools = json["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);
    assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
}

#[tokio::test]
async fn test_mcp_tool_call_with_alias() {
    let (status, json) = rpc(json!({
        "jsonrpc": "2.0",
        "id": "abc",
        "method": "tools/call",
        "params": { "name": "analyze_wallet_live", "arguments": { "address": "sei1whale" } }
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "abc");
    let result = &json["result"];
    assert_eq!(result["isError"], false);
    assert_eq!(result["structuredContent"]["scores"]["whale_score"], 0.7);
    assert_eq!(result["content"][0]["type"], "text");
}

#[tokio::test]
async fn test_mcp_unknown_method() {
    let (status, json) = rpc(json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/destroy" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"]["code"], -32601);
    assert!(json.get("result").is_none());
}

#[tokio::test]
async fn test_mcp_parse_error() {
    let (status, json) = post(common::build_test_app(), "/mcp", "{\"jsonrpc\":".into()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"]["code"], -32700);
    assert_eq!(json["id"], Value::Null);
}

#[tokio::test]
async fn test_mcp_invalid_request() {
    let (_, json) = rpc(json!({ "jsonrpc": "1.0", "id": 4, "method": "ping" })).await;
    assert_eq!(json["error"]["code"], -32600);

    let (_, json) = rpc(json!({ "jsonrpc": "2.0", "id": 5 })).await;
    assert_eq!(json["error"]["code"], -32600);
}

#[tokio::test]
async fn test_mcp_invalid_params_and_network_failure() {
    let (status, json) = rpc(json!({
        "jsonrpc": "2.0",
        "id": 6,
        "method": "tools/call",
        "params": { "name": "compare_addresses", "arguments": { "addresses": ["sei1whale"] } }
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"]["code"], -32602);

    let (_, json) = rpc(json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "tools/call",
        "params": { "name": "analyze_wallet", "arguments": { "address": "sei1unknown" } }
    }))
    .await;
    assert_eq!(json["error"]["code"], -32603);

    let (_, json) = rpc(json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "tools/call",
        "params": { "name": "no_such_tool" }
    }))
    .await;
    assert_eq!(json["error"]["code"], -32602);
}

#[tokio::test]
async fn test_mcp_notification_has_no_body() {
    let resp = common::build_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .body(Body::from(
                    json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}
