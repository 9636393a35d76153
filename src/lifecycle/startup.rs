//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Bind the listener and run the server
//! - Trigger graceful shutdown on signal
//! - Surface a server that dies on its own without waiting for a signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last, after every subsystem is ready

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::EdgeConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::metrics;

/// Errors that abort startup or end the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("server I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run the server with `config` until a shutdown signal arrives.
pub async fn start(config: EdgeConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        max_body_bytes = config.listener.max_body_bytes,
        body_read_timeout_ms = config.adapter.body_read_timeout_ms,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    supervise(
        server.run(listener, shutdown.signalled()),
        &shutdown,
        signals::wait_for_signal(),
    )
    .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Run `server` until `stop` resolves, then trigger `shutdown` and join it.
///
/// Returns early if the server exits first.
async fn supervise<F, S>(server: F, shutdown: &Shutdown, stop: S) -> Result<(), StartupError>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
    S: Future<Output = ()>,
{
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            result??;
            tracing::warn!("Server stopped without a shutdown signal");
            return Ok(());
        }
        _ = stop => {}
    }

    shutdown.trigger();
    server_task.await??;
    Ok(())
}
