//! Listener and lifecycle.

use crate::handlers::router;
use livepad_core::Playground;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,
}

impl ServerConfig {
    #[must_use]
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

/// Run the HTTP server until ctrl-c.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig, playground: Playground) -> io::Result<()> {
    let listener = TcpListener::bind(config.addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "livepad listening");

    axum::serve(listener, router(playground))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested, exiting"),
        Err(e) => {
            // Without a signal handler the server runs until killed.
            warn!(error = %e, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
