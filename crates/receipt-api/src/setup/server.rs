//! TCP listener and graceful shutdown

use anyhow::{Context, Result};
use axum::Router;
use receipt_core::Config;
use tokio::net::TcpListener;

/// Bind the configured port and serve `app` until a shutdown signal arrives.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        upload_dir = %config.upload_dir(),
        max_upload_bytes = config.max_upload_size_bytes(),
        cors_origins = ?config.cors_origins(),
        "Receipt API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("Server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    let signal = tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        res = terminate() => res.map(|_| "SIGTERM"),
    };

    match signal {
        Ok(name) => tracing::info!(signal = name, "Draining connections before exit"),
        Err(e) => tracing::error!(error = %e, "Signal listener failed, shutting down"),
    }
}

#[cfg(unix)]
async fn terminate() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> std::io::Result<()> {
    std::future::pending().await
}
