use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

use server::config::ServerConfig;
use server::routes::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    info!("Starting TTS relay server...");

    let config = ServerConfig::from_env();
    if config.default_credentials().is_none() {
        warn!("No default provider credentials configured; requests must carry their own");
    }
    info!(
        "Server configuration loaded: port={}, request_timeout={}s",
        config.port, config.request_timeout_secs
    );

    let state = AppState::new(config.clone());
    let app = app(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}. Try a different PORT."))?;

    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
