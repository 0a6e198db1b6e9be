//! # Contenido Dinámico (CGI)
//! src/content/cgi.rs
//!
//! El servidor envía solo la status line. Después lanza el programa con
//! stdout y stdin apuntando al socket del cliente, así que los headers,
//! la línea vacía y el body los escribe el propio programa.
//!
//! ```text
//! servidor → HTTP/1.0 200 OK\r\n
//! programa → Content-type: text/html\r\n
//!            Content-length: 42\r\n
//!            \r\n
//!            ...
//! ```

use crate::error::ServeError;
use crate::http::{Response, StatusCode};
use std::io::Write;
use std::os::fd::AsFd;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, warn};

/// Variable de entorno con los argumentos del request
pub const ARGS_ENV: &str = "QUERY_STRING";

/// Lanza un programa CGI ya validado (regular y ejecutable) y espera a que
/// termine.
///
/// Los argumentos llegan al programa solo por `QUERY_STRING`, nunca por
/// la línea de comandos. El stderr del programa es el del servidor.
pub fn serve_dynamic<W>(out: &mut W, program: &Path, args: &str) -> Result<ExitStatus, ServeError>
where
    W: Write + AsFd,
{
    out.write_all(Response::status_line(StatusCode::Ok).as_bytes())?;
    out.flush()?;

    // Cada Stdio se queda con su propio duplicado del descriptor
    let stdout = out.as_fd().try_clone_to_owned()?;
    let stdin = out.as_fd().try_clone_to_owned()?;

    let mut child = Command::new(program)
        .env(ARGS_ENV, args)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .spawn()
        .map_err(|source| ServeError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

    debug!(pid = child.id(), program = %program.display(), "programa CGI lanzado");

    let status = child.wait()?;
    if !status.success() {
        warn!(program = %program.display(), %status, "programa CGI terminó con error");
    }

    Ok(status)
}
