use product_copywriter::{
    config::AppConfig,
    gemini::GeminiClient,
    routes::{build_router, AppState},
};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    if config.is_demo() {
        tracing::warn!("GEMINI_API_KEY not set, running in demo mode");
    } else {
        let prefix: String = config.gemini_api_key.chars().take(4).collect();
        tracing::info!("Using API key: {}...", prefix);
    }

    let gemini = GeminiClient::new(&config)?;
    let app = build_router(AppState::new(Arc::new(gemini)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
