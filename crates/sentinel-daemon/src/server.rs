//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use axum::extract::DefaultBodyLimit;
use sentinel_guard::ScanEngines;
use tokio::net::TcpListener;

/// Sentinel screening server
pub struct Server {
    config: DaemonConfig,
    engines: ScanEngines,
}

impl Server {
    /// Create a new server, loading the threat dictionary and validating
    /// thresholds. Fails before anything binds.
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let engines = config.engine().build_engines()?;
        Ok(Self { config, engines })
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let state = AppState::new(self.engines);
        let app = create_router(state, self.config.server.enable_cors)
            .layer(DefaultBodyLimit::max(self.config.server.max_body_size));

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Sentinel daemon listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Sentinel daemon shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
