use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod app;
mod error;
mod http;
mod recorder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartcast_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path > CHARTCAST_CONFIG env > ~/.chartcast/chartcast.toml
    let config_path = std::env::var("CHARTCAST_CONFIG").ok();
    let config =
        chartcast_core::ChartcastConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
            warn!("Config load failed ({}), using defaults", e);
            chartcast_core::ChartcastConfig::default()
        });

    if config.gateway.secret.is_none() {
        warn!("no gateway.secret configured, /webhook accepts unauthenticated requests");
    }
    if config.tiktok.access_token.is_none() {
        info!("no tiktok.access_token configured, posts will be skipped (safe mode)");
    } else if config.tiktok.mock {
        info!("tiktok.mock enabled, posts are logged but not sent");
    }

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    let poster = chartcast_tiktok::TikTokClient::new(config.tiktok.clone())?;
    let state = Arc::new(app::AppState::new(config, Box::new(poster)));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("Chartcast gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
