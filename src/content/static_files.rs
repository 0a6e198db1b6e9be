//! # Contenido Estático
//! src/content/static_files.rs
//!
//! Envía un archivo tal cual, precedido de `Content-type` y
//! `Content-length`. El archivo se copia con `io::copy`, sin cargarlo
//! completo en memoria.

use crate::error::ServeError;
use crate::http::response::CONTENT_TYPE;
use crate::http::{Response, StatusCode};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Tabla extensión → MIME type
const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("gif", "image/gif"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("mp4", "video/mp4"),
];

const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Determina el Content-type a partir de la extensión
///
/// # Ejemplo
/// ```
/// use std::path::Path;
/// use tiny_server::content::content_type;
///
/// assert_eq!(content_type(Path::new("./home.html")), "text/html");
/// assert_eq!(content_type(Path::new("./notes")), "text/plain");
/// ```
pub fn content_type(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext,
        None => return DEFAULT_MIME_TYPE,
    };

    MIME_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// Sirve un archivo ya validado (regular y legible).
///
/// `size` viene del `stat` del dispatcher. Se envían exactamente `size`
/// bytes; si el archivo se achicó entre el `stat` y la copia se retorna
/// `UnexpectedEof`. Retorna los bytes del body enviados.
pub fn serve_static<W: Write>(out: &mut W, path: &Path, size: u64) -> Result<u64, ServeError> {
    // Abrir antes de escribir nada: si falla, el cliente no recibe una cabecera a medias
    let file = File::open(path)?;

    let head = Response::new(StatusCode::Ok)
        .with_header(CONTENT_TYPE, content_type(path))
        .with_content_length(size);
    out.write_all(&head.head_bytes())?;

    let sent = io::copy(&mut file.take(size), out)?;
    out.flush()?;

    if sent < size {
        return Err(ServeError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} shrank: sent {} of {} bytes", path.display(), sent, size),
        )));
    }

    Ok(sent)
}
