use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::signal;
use tokio::sync::oneshot;

use vitalboard::api::RestApi;
use vitalboard::config::{self, ConfigError};
use vitalboard::error::DashboardError;
use vitalboard::refresh::{Dashboard, RefreshEngine};
use vitalboard::source::SqliteSource;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    env_logger::init();

    let config = config::load_config(Path::new("config.yaml"))?;
    info!(
        "Starting vitalboard against {} ({} rows every {}s)",
        config.source.database_url, config.source.window_rows, config.refresh.interval_secs
    );

    let source = SqliteSource::connect(&config.source.database_url).await?;
    let dashboard = Arc::new(Dashboard::new());

    let engine = RefreshEngine::new(
        source,
        Arc::clone(&dashboard),
        config.source.window_rows,
        Duration::from_secs(config.refresh.interval_secs.max(1)),
    );

    let api = RestApi::new(Arc::clone(&dashboard));
    let routes = api.routes();

    let host: IpAddr = config
        .api
        .host
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("api.host: {}", config.api.host)))?;

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown((host, config.api.port), async move {
            shutdown_rx.await.ok();
            info!("Shutting down server...");
        });

    info!("Serving dashboard on {}", addr);
    let server_handle = tokio::spawn(server);

    // The refresh loop runs on this task until Ctrl+C.
    tokio::select! {
        _ = engine.run() => {}
        result = signal::ctrl_c() => {
            result?;
            info!("Ctrl+C received, starting graceful shutdown");
        }
    }

    shutdown_tx.send(()).ok();
    server_handle.await.ok();

    info!("Server shutdown complete");
    Ok(())
}
