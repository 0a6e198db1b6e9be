//! # Lectura y Parsing de Requests HTTP/1.0
//! src/http/request.rs
//!
//! El servidor solo mira la primera línea del request. Los headers se
//! leen y se descartan hasta la línea vacía.
//!
//! ## Formato
//!
//! ```text
//! GET /cgi-bin/adder?2&3 HTTP/1.0\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! Las líneas pueden terminar en `\r\n` o solo en `\n`.

use std::io::{self, BufRead, Read};
use tracing::debug;

/// Longitud máxima de una línea (request line o header), incluyendo el terminador
pub const MAX_LINE: usize = 8192;

/// Método HTTP del request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - El único método que implementa el servidor
    Get,

    /// Cualquier otro token (POST, HEAD, ...), guardado tal cual llegó
    Unsupported(String),
}

impl Method {
    /// Parsea el token del método. La comparación con GET no distingue
    /// mayúsculas de minúsculas.
    fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("GET") {
            Method::Get
        } else {
            Method::Unsupported(token.to_string())
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Unsupported(token) => token,
        }
    }
}

/// Primera línea de un request: `METHOD URI VERSION`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    uri: String,
    /// Versión HTTP; solo se usa para logging
    version: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Línea vacía
    EmptyRequest,

    /// La línea no tiene exactamente tres tokens
    InvalidRequestLine(String),

    /// La línea no es UTF-8 válido
    InvalidEncoding,

    /// La línea supera `MAX_LINE` bytes
    LineTooLong,

    /// El URI no empieza con '/'
    InvalidUri(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine(l) => write!(f, "Invalid request line: {}", l),
            ParseError::InvalidEncoding => write!(f, "Request line is not valid UTF-8"),
            ParseError::LineTooLong => write!(f, "Line exceeds {} bytes", MAX_LINE),
            ParseError::InvalidUri(u) => write!(f, "URI must start with '/': {}", u),
        }
    }
}

impl std::error::Error for ParseError {}

/// Resultado de leer una línea del stream
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    /// Línea completa, sin el terminador
    Complete(Vec<u8>),

    /// El peer cerró sin enviar ni un byte más
    Eof,

    /// El peer cerró a mitad de línea; bytes recibidos sin terminador
    Partial(Vec<u8>),

    /// La línea no cabe en `MAX_LINE`
    TooLong,
}

/// Lee una línea terminada en `\n` y le quita `\r\n` / `\n`.
///
/// Si el peer cierra a mitad de línea retorna `Line::Partial`.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Line> {
    let mut buf = Vec::new();
    let n = reader.by_ref().take(MAX_LINE as u64).read_until(b'\n', &mut buf)?;

    if n == 0 {
        return Ok(Line::Eof);
    }

    if buf.last() != Some(&b'\n') {
        if n == MAX_LINE {
            return Ok(Line::TooLong);
        }
        return Ok(Line::Partial(buf));
    }

    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Line::Complete(buf))
}

/// Lee y descarta los headers hasta la línea vacía (inclusive).
///
/// Si el stream termina antes de la línea vacía (aunque sea a mitad de
/// un header) se considera que los headers terminaron. Retorna cuántos headers se descartaron.
pub fn skip_headers<R: BufRead>(reader: &mut R) -> io::Result<Result<usize, ParseError>> {
    let mut count = 0;

    loop {
        match read_line(reader)? {
            Line::Complete(line) if line.is_empty() => return Ok(Ok(count)),
            Line::Complete(line) => {
                debug!(header = %String::from_utf8_lossy(&line), "header descartado");
                count += 1;
            }
            Line::Partial(line) => {
                debug!(header = %String::from_utf8_lossy(&line), "header incompleto al cerrar");
                return Ok(Ok(count + 1));
            }
            Line::Eof => return Ok(Ok(count)),
            Line::TooLong => return Ok(Err(ParseError::LineTooLong)),
        }
    }
}

impl RequestLine {
    /// Parsea la request line (sin terminador)
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use tiny_server::http::{Method, RequestLine};
    ///
    /// let line = RequestLine::parse(b"GET /home.html HTTP/1.0").unwrap();
    /// assert_eq!(line.method(), &Method::Get);
    /// assert_eq!(line.uri(), "/home.html");
    /// ```
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let line = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidEncoding)?;

        if line.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Debe tener exactamente 3 partes: METHOD URI VERSION
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        // Solo origin-form: el URI se concatena al document root
        if !parts[1].starts_with('/') {
            return Err(ParseError::InvalidUri(parts[1].to_string()));
        }

        Ok(RequestLine {
            method: Method::from_token(parts[0]),
            uri: parts[1].to_string(),
            version: parts[2].to_string(),
        })
    }

    /// Lee la request line del stream.
    ///
    /// El `Result` externo es de I/O (la conexión se aborta); el interno es
    /// de protocolo (se responde 400). `Ok(None)` significa que el peer
    /// cerró sin enviar nada.
    pub fn read_from<R: BufRead>(reader: &mut R) -> io::Result<Option<Result<Self, ParseError>>> {
        match read_line(reader)? {
            Line::Complete(raw) => Ok(Some(Self::parse(&raw))),
            Line::TooLong => Ok(Some(Err(ParseError::LineTooLong))),
            Line::Partial(_) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed in the middle of the request line",
            )),
            Line::Eof => Ok(None),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for RequestLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.method.as_str(), self.uri, self.version)
    }
}
