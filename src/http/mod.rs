//! # Módulo HTTP
//!
//! Implementación mínima de HTTP/1.0 (RFC 1945), sin librerías de alto nivel:
//!
//! - Lectura de líneas y parsing de la request line
//! - Construcción de responses y páginas de error
//! - Códigos de estado
//!
//! ### Formato de Request
//!
//! ```text
//! GET /home.html HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-type: text/html\r\n
//! Content-length: 120\r\n
//! \r\n
//! <html>...
//! ```

pub mod request;   // Request line y headers
pub mod response;  // Construcción de responses
pub mod status;    // Códigos de estado HTTP

pub use request::{Method, ParseError, RequestLine};
pub use response::Response;
pub use status::StatusCode;
