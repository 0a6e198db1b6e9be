//! # Tiny Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 iterativo que sirve contenido estático y dinámico
//! (CGI). Atiende una conexión a la vez: lee un request, envía una
//! respuesta y cierra.
//!
//! ## Arquitectura
//!
//! - `http`: Request line, respuestas y códigos de estado
//! - `router`: Clasificación de URIs (estático / dinámico)
//! - `content`: Archivos estáticos y programas CGI
//! - `server`: Dispatcher y loop TCP
//! - `config`: Argumentos CLI y variables de entorno
//! - `logging`: Subscriber de `tracing`
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use tiny_server::config::Config;
//! use tiny_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al iniciar servidor");
//! server.run();
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
