//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. `tcp`: escucha en un puerto y acepta conexiones, una a la vez
//! 2. `dispatch`: lee el request y decide la respuesta

pub mod dispatch;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use dispatch::{Dispatcher, Outcome};
pub use tcp::Server;
