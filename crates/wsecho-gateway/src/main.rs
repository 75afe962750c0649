//! wsEcho gateway binary.
//!
//! - WebSocket endpoint: `gateway.path` (default `/ws`), origin-gated
//! - Ping every `ping_interval_ms`, close after `idle_timeout_ms` of silence
//! - Config from `$WSECHO_CONFIG`, else `wsecho.yaml`, else defaults

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wsecho_gateway::{app_state::AppState, config, server};

#[tokio::main]
async fn main() -> Result<(), server::BootError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load_from_env()?;
    let listen = cfg.gateway.listen_addr()?;
    let state = AppState::new(cfg)?;

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(%listen, "wsecho-gateway starting");

    server::serve(listener, state, server::shutdown_signal()).await?;
    Ok(())
}
