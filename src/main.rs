#![forbid(unsafe_code)]

use blueprints_rust::config::AppConfig;
use blueprints_rust::errors::CoreError;
use blueprints_rust::{build_app, build_persistence, telemetry};
use tokio::net::TcpListener;
use tracing::{error, info};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    let cfg = AppConfig::from_env()?;
    telemetry::init_tracing(cfg.log_json);

    // Pool + migraciones son bloqueantes.
    let storage_cfg = cfg.clone();
    let persistence = tokio::task::spawn_blocking(move || build_persistence(&storage_cfg))
        .await
        .map_err(|e| CoreError::Internal(format!("startup task failed: {e}")))?
        .inspect_err(|e| error!(error = %e, "failed to initialize storage"))?;

    let app = build_app(persistence);
    let listener = TcpListener::bind(cfg.server.bind).await?;
    info!(addr = %cfg.server.bind, storage = ?cfg.storage, "blueprints server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
