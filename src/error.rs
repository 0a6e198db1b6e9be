//! # Errores del Servidor
//! src/error.rs
//!
//! Errores que abortan el manejo de una conexión. Los errores de
//! protocolo y de recursos (400, 403, 404, 501) no llegan aquí: el
//! dispatcher los convierte en una respuesta HTTP.

use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ServeError {
    /// El peer cerró la conexión sin enviar la request line
    ConnectionClosed,

    /// Falla de lectura/escritura en el socket o en el archivo
    Io(io::Error),

    /// No se pudo lanzar el programa CGI
    Spawn { program: PathBuf, source: io::Error },
}

impl std::fmt::Display for ServeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServeError::ConnectionClosed => write!(f, "Connection closed before request line"),
            ServeError::Io(e) => write!(f, "I/O error: {}", e),
            ServeError::Spawn { program, source } => {
                write!(f, "Failed to spawn {}: {}", program.display(), source)
            }
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServeError::ConnectionClosed => None,
            ServeError::Io(e) => Some(e),
            ServeError::Spawn { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for ServeError {
    fn from(e: io::Error) -> Self {
        ServeError::Io(e)
    }
}
