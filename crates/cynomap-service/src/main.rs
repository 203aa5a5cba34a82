//! Cyno map HTTP service.
//!
//! # Configuration
//!
//! See [`ServiceConfig`] for the map settings; logging follows `RUST_LOG`
//! and `LOG_FORMAT`.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use cynomap_lib::{CachedTracker, HttpTrackingClient, TrackingApi};
use cynomap_service::{app, init_logging, AppState, LoggingConfig, ServiceConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("cynomap");
    init_logging(&logging_config);

    let config = ServiceConfig::from_env();
    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        tracking_url = %config.tracking_url,
        default_range = %config.default_range,
        tracking_configured = config.credentials.is_some(),
        "starting cyno map service"
    );
    if !config.data_path.is_file() {
        warn!(path = %config.data_path.display(), "dataset missing; maps will be unavailable");
    }

    // The blocking client owns its own runtime; it is created and finally
    // dropped outside the async runtime below.
    let client = HttpTrackingClient::new(config.tracking_url.clone())?;
    let tracker: Arc<dyn TrackingApi> = Arc::new(CachedTracker::new(client, config.cache_ttl));

    let state = AppState::new(
        config.data_path.clone(),
        Arc::clone(&tracker),
        config.credentials.clone(),
        config.default_range,
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(state, config.port))?;
    drop(runtime);
    drop(tracker);

    Ok(())
}

async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
