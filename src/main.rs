use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use fpl_compare::api::build_router;
use fpl_compare::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("FPL compare API starting on {}", config.bind_addr);
    info!("fantasy upstream: {}", config.fpl_base_url);
    info!(
        "history upstream: {} ({} seasons)",
        config.history_base_url,
        config.history_seasons.len()
    );

    let bind_addr = config.bind_addr.clone();
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("bind {bind_addr}"))?;
    axum::serve(listener, app).await.context("serve http")?;
    Ok(())
}
