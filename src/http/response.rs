//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! API para construir respuestas HTTP/1.0 y convertirlas a bytes.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-type: text/html\r\n
//! Content-length: 120\r\n
//! \r\n
//! <html>...
//! ```
//!
//! Los headers se escriben en el orden en que se agregaron.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use tiny_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-type", "text/plain")
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::StatusCode;
use std::io::{self, Write};

/// Nombre del header de tipo de contenido
pub const CONTENT_TYPE: &str = "Content-type";

/// Nombre del header de longitud
pub const CONTENT_LENGTH: &str = "Content-length";

/// Máximo de caracteres de la causa que se muestran en una página de error
pub const MAX_CAUSE_CHARS: usize = 1024;

/// Representa una respuesta HTTP/1.0
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (vacío cuando el body se envía aparte)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo desde un string y calcula `Content-length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo desde bytes y calcula `Content-length`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let len = self.body.len() as u64;
        self.with_content_length(len)
    }

    /// Declara la longitud de un body que se enviará después de la
    /// cabecera (por ejemplo, un archivo copiado con `io::copy`)
    pub fn with_content_length(self, len: u64) -> Self {
        self.with_header(CONTENT_LENGTH, &len.to_string())
    }

    /// Crea la página HTML de error
    ///
    /// La causa viene del request, así que se recorta a
    /// `MAX_CAUSE_CHARS` caracteres y se escapa antes de insertarla.
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error_page(
    ///     StatusCode::NotFound,
    ///     "Tiny couldn't find this file",
    ///     "./missing.html",
    /// );
    /// assert_eq!(response.header("Content-type"), Some("text/html"));
    /// ```
    pub fn error_page(status: StatusCode, long_msg: &str, cause: &str) -> Self {
        let cause = match cause.char_indices().nth(MAX_CAUSE_CHARS) {
            Some((idx, _)) => &cause[..idx],
            None => cause,
        };

        let mut body = String::new();
        body.push_str("<html><title>Tiny Error</title>");
        body.push_str("<body bgcolor=\"#ffffff\">\r\n");
        body.push_str(&format!("{}: {}\r\n", status.as_u16(), status.reason_phrase()));
        body.push_str(&format!("<p>{}: {}\r\n", long_msg, escape_html(cause)));
        body.push_str("<hr><em>The Tiny Web server</em>\r\n");

        Self::new(status)
            .with_header(CONTENT_TYPE, "text/html")
            .with_body(&body)
    }

    /// Status line sola: `HTTP/1.0 200 OK\r\n`
    pub fn status_line(status: StatusCode) -> String {
        format!("HTTP/1.0 {}\r\n", status)
    }

    /// Status line, headers y la línea vacía, sin el body
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut result = Self::status_line(self.status).into_bytes();

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result
    }

    /// Respuesta completa lista para enviar por el socket
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.head_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Escribe la respuesta completa y hace flush
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_bytes())?;
        out.flush()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el valor de un header (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Escapa los caracteres especiales de HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
