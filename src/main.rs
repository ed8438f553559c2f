use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tracing::info;

use hermes_dex_analyzer::{
    api::analysis_routes, AnalyzerConfig, DexAnalyzer, RefreshScheduler, RpcVenueConnector,
    VenueRegistry,
};

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AnalyzerConfig {
        analysis_interval: Duration::from_secs(env_u64("ANALYSIS_INTERVAL_SECS", 30)),
        rotation_interval: Duration::from_secs(env_u64("ROTATION_INTERVAL_SECS", 3600)),
        ..AnalyzerConfig::default()
    };

    let registry = VenueRegistry::mainnet()?;
    info!(
        "✅ Venue registry loaded: {} venues, {} active",
        registry.len(),
        registry.active_venues().len()
    );

    let analyzer = Arc::new(DexAnalyzer::new(
        registry,
        Arc::new(RpcVenueConnector::new()),
        config,
    ));

    let scheduler = RefreshScheduler::new(Arc::clone(&analyzer));
    scheduler.start().await;
    info!("✅ Refresh scheduler started");

    let app = analysis_routes()
        .with_state(Arc::clone(&analyzer))
        .layer(CorsLayer::permissive());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    info!("🚀 Starting analyzer service on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
