use livepad_core::{Config, Playground};
use livepad_server::{run_server, ServerConfig};
use miette::{miette, IntoDiagnostic, Result};
use std::net::SocketAddr;
use tracing::info;

/// Run the serve command.
///
/// Binds the HTTP surface and blocks until ctrl-c.
pub fn run(config: &Config) -> Result<()> {
    let bind = config.bind_addr();
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| miette!("invalid listen address {bind}: {e}"))?;

    let playground = Playground::in_memory();
    info!(?playground, "pipeline ready");

    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    runtime.block_on(async {
        run_server(ServerConfig::new(addr), playground)
            .await
            .into_diagnostic()
    })
}
