//! # Servir Contenido
//! src/content/mod.rs
//!
//! - **static_files**: Archivos del document root, con Content-type por extensión
//! - **cgi**: Programas externos cuya salida va directo al cliente
//!
//! `FileMeta` se obtiene una sola vez por request; el dispatcher decide con
//! ella y no vuelve a consultar el filesystem antes de servir.

pub mod cgi;
pub mod static_files;

pub use cgi::serve_dynamic;
pub use static_files::{content_type, serve_static};

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Bit de lectura del dueño (S_IRUSR)
const OWNER_READ: u32 = 0o400;

/// Bit de ejecución del dueño (S_IXUSR)
const OWNER_EXEC: u32 = 0o100;

/// Metadata de un archivo pedido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    is_regular: bool,
    mode: u32,
    size: u64,
}

impl FileMeta {
    /// Hace `stat` (siguiendo symlinks). `None` si el path no existe o no
    /// se puede consultar.
    pub fn stat(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        Some(Self {
            is_regular: meta.is_file(),
            mode: meta.permissions().mode(),
            size: meta.len(),
        })
    }

    pub fn is_regular(&self) -> bool {
        self.is_regular
    }

    pub fn readable_by_owner(&self) -> bool {
        self.mode & OWNER_READ != 0
    }

    pub fn executable_by_owner(&self) -> bool {
        self.mode & OWNER_EXEC != 0
    }

    /// Tamaño en bytes
    pub fn size(&self) -> u64 {
        self.size
    }
}
