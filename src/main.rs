use anyhow::Result;
use grid_atlas::{api, config::Config, state::AppState, telemetry};
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    if cfg.store.provider == "rest" && cfg.store.api_key.is_empty() {
        anyhow::bail!(
            "ATLAS__STORE__API_KEY must be set when using the 'rest' store provider; \
            the managed store rejects unauthenticated requests"
        );
    }

    let state = AppState::new(cfg.clone())?;

    let app = api::router(state, &cfg);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!(
            "WARNING: Server binding to 0.0.0.0 - service will be accessible from network! \
            For production, bind to 127.0.0.1 unless behind a firewall/reverse proxy."
        );
    }

    info!(%addr, provider = %cfg.store.provider, "starting Grid Atlas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
