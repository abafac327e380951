pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod qr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use config::Config;
use db::Store;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = Store::new(&config.general.database_path).await?;

    tokio::fs::create_dir_all(&config.general.static_path)
        .await
        .with_context(|| {
            format!(
                "Failed to create static directory: {}",
                config.general.static_path
            )
        })?;

    let state = api::create_app_state(&config, store);
    let app = api::router(state, &config);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 outpass running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
