//! Edge session adapter (v1)
//!
//! Hosts the session context adapter behind an axum server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────┐    ┌───────────┐    ┌───────────┐
//!     ───────────────────▶│  http    │───▶│  adapter  │───▶│ pipeline  │
//!                         │  server  │    │  inbound  │    │ (external)│
//!                         └──────────┘    └───────────┘    └─────┬─────┘
//!                                                                │
//!     Client Response     ┌──────────┐    ┌───────────┐          │
//!     ◀───────────────────│  host    │◀───│  adapter  │◀─────────┘
//!                         │ response │    │  outbound │
//!                         └──────────┘    └───────────┘
//!
//!     Cross-cutting: config · observability · lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;

use edge_session::config::{load_config, EdgeConfig};
use edge_session::lifecycle::startup;
use edge_session::observability::logging;

#[derive(Parser)]
#[command(name = "edge-session")]
#[command(about = "HTTP edge session adapter", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "EDGE_SESSION_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "edge-session v0.1.0 starting"
    );

    startup::start(config).await?;
    Ok(())
}
