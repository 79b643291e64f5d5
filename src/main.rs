use sei_analyzer::api::router::create_router;
use sei_analyzer::config::{AppConfig, Transport};
use sei_analyzer::{metrics, stdio, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config);

    let metrics_handle = metrics::init_metrics()?;

    tracing::info!(
        policy = %config.policy,
        endpoints = config.sei_api_endpoints.len(),
        cache_ttl_secs = config.network_cache_ttl.as_secs(),
        "Scoring engine configured"
    );

    let transport = config.transport;
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::from_config(config, metrics_handle)?;

    match transport {
        Transport::Stdio => stdio::run(state).await,
        Transport::Http => {
            let router = create_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Server listening on {addr}");
            axum::serve(listener, router).await?;
            Ok(())
        }
    }
}

/// Stdout belongs to the protocol in stdio mode, so logs always go to stderr.
fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
