//! # Logging
//! src/logging.rs
//!
//! Inicializa el subscriber de `tracing`. `RUST_LOG` tiene prioridad sobre
//! el nivel de la configuración:
//!
//! ```bash
//! RUST_LOG=tiny_server=debug ./tiny 8000
//! ```

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Construye el filtro: `RUST_LOG` si está definido, si no `level`
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Instala el subscriber global. Falla si ya había uno instalado.
pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
