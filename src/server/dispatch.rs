//! # Dispatcher de Requests
//! src/server/dispatch.rs
//!
//! Procesa exactamente un request por conexión:
//!
//! ```text
//! START → METHOD_CHECK ─→ REJECTED_METHOD (501)
//!              ↓
//!       HEADERS_CONSUMED → CLASSIFIED ─→ NOT_FOUND (404)
//!                                    ├─→ FORBIDDEN (403)
//!                                    ├─→ STATIC_SERVED (200)
//!                                    └─→ DYNAMIC_SERVED (200)
//! ```
//!
//! Una request line o un header ilegible terminan en BAD_REQUEST (400).
//! Cada camino escribe una sola respuesta.

use crate::config::Config;
use crate::content::{self, FileMeta};
use crate::error::ServeError;
use crate::http::request::{self, RequestLine};
use crate::http::{Method, ParseError, Response, StatusCode};
use crate::router::{ContentKind, Router, Target};
use std::io::{BufRead, Write};
use std::os::fd::AsFd;
use std::process::ExitStatus;
use tracing::{debug, info};

/// Estado terminal de un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BadRequest,
    MethodRejected,
    NotFound,
    Forbidden,
    /// Archivo enviado; bytes del body
    Static { bytes: u64 },
    /// Programa CGI terminado
    Dynamic { exit: ExitStatus },
}

impl Outcome {
    /// Código de estado enviado al cliente
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::BadRequest => StatusCode::BadRequest,
            Outcome::MethodRejected => StatusCode::NotImplemented,
            Outcome::NotFound => StatusCode::NotFound,
            Outcome::Forbidden => StatusCode::Forbidden,
            Outcome::Static { .. } | Outcome::Dynamic { .. } => StatusCode::Ok,
        }
    }
}

/// Decide cómo responder a cada request
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    router: Router,
}

impl Dispatcher {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Router::new(&config.doc_root, &config.cgi_marker, &config.index_file))
    }

    /// Lee un request de `reader` y escribe la respuesta en `out`.
    ///
    /// Los errores de protocolo y de recursos se responden con una página
    /// de error y retornan `Ok`. Solo las fallas de I/O (y de spawn)
    /// retornan `Err`; en ese caso la conexión se debe cerrar.
    pub fn dispatch<R, W>(&self, reader: &mut R, out: &mut W) -> Result<Outcome, ServeError>
    where
        R: BufRead,
        W: Write + AsFd,
    {
        let line = match RequestLine::read_from(reader)? {
            Some(Ok(line)) => line,
            Some(Err(e)) => return bad_request(out, &e),
            None => return Err(ServeError::ConnectionClosed),
        };
        info!(
            method = line.method().as_str(),
            uri = line.uri(),
            version = line.version(),
            "request"
        );

        if let Method::Unsupported(method) = line.method() {
            reply_error(out, StatusCode::NotImplemented, "Tiny does not implement this method", method)?;
            return Ok(Outcome::MethodRejected);
        }

        let headers = match request::skip_headers(reader)? {
            Ok(count) => count,
            Err(e) => return bad_request(out, &e),
        };
        debug!(headers, "headers consumidos");

        let target = self.router.classify(line.uri());
        self.serve_target(out, &target)
    }

    fn serve_target<W: Write + AsFd>(&self, out: &mut W, target: &Target) -> Result<Outcome, ServeError> {
        let cause = target.path().display().to_string();

        if target.escapes_root() {
            reply_error(out, StatusCode::Forbidden, "Tiny won't serve files outside its root", &cause)?;
            return Ok(Outcome::Forbidden);
        }

        let meta = match FileMeta::stat(target.path()) {
            Some(meta) => meta,
            None => {
                reply_error(out, StatusCode::NotFound, "Tiny couldn't find this file", &cause)?;
                return Ok(Outcome::NotFound);
            }
        };

        match target.kind() {
            ContentKind::Static => {
                if !meta.is_regular() || !meta.readable_by_owner() {
                    reply_error(out, StatusCode::Forbidden, "Tiny couldn't read the file", &cause)?;
                    return Ok(Outcome::Forbidden);
                }
                let bytes = content::serve_static(out, target.path(), meta.size())?;
                Ok(Outcome::Static { bytes })
            }
            ContentKind::Dynamic => {
                if !meta.is_regular() || !meta.executable_by_owner() {
                    reply_error(out, StatusCode::Forbidden, "Tiny couldn't run the CGI program", &cause)?;
                    return Ok(Outcome::Forbidden);
                }
                let exit = content::serve_dynamic(out, target.path(), target.args())?;
                Ok(Outcome::Dynamic { exit })
            }
        }
    }
}

fn reply_error<W: Write>(out: &mut W, status: StatusCode, long_msg: &str, cause: &str) -> Result<(), ServeError> {
    Response::error_page(status, long_msg, cause).write_to(out)?;
    Ok(())
}

fn bad_request<W: Write>(out: &mut W, err: &ParseError) -> Result<Outcome, ServeError> {
    debug!(error = %err, "request inválido");
    reply_error(out, StatusCode::BadRequest, "Tiny couldn't parse the request", &err.to_string())?;
    Ok(Outcome::BadRequest)
}
