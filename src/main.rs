//! # Tiny - Entry Point
//! src/main.rs
//!
//! Uso: `tiny <port> [opciones]`

use anyhow::{bail, Context, Result};
use tiny_server::config::Config;
use tiny_server::logging;
use tiny_server::server::Server;

fn main() -> Result<()> {
    let config = Config::new();
    if let Err(msg) = config.validate() {
        bail!("invalid configuration: {}", msg);
    }

    logging::init(&config.log_level)?;
    config.log_summary();

    let server = Server::bind(config.clone())
        .with_context(|| format!("failed to listen on {}", config.address()))?;

    server.run()
}
