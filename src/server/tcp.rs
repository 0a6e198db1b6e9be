//! # Servidor TCP Iterativo
//! src/server/tcp.rs
//!
//! Acepta una conexión, la atiende completa y la cierra antes de aceptar
//! la siguiente. No hay threads ni estado compartido entre conexiones.

use super::dispatch::{Dispatcher, Outcome};
use crate::config::Config;
use crate::error::ServeError;
use std::io::{self, BufReader, Read};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Máximo de bytes que se descartan al cerrar la conexión
const LINGER_DRAIN_LIMIT: u64 = 64 * 1024;

/// Tiempo máximo esperando que el cliente cierre su lado
const LINGER_TIMEOUT: Duration = Duration::from_millis(500);

/// Servidor HTTP/1.0 iterativo
pub struct Server {
    config: Config,
    dispatcher: Dispatcher,
    listener: TcpListener,
}

impl Server {
    /// Crea el socket de escucha en `config.address()`
    pub fn bind(config: Config) -> io::Result<Self> {
        let listener = TcpListener::bind(config.address())?;
        let dispatcher = Dispatcher::from_config(&config);

        Ok(Self {
            config,
            dispatcher,
            listener,
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop principal: nunca retorna
    pub fn run(&self) -> ! {
        match self.local_addr() {
            Ok(addr) => info!(%addr, "servidor escuchando"),
            Err(e) => warn!(error = %e, "no se pudo obtener la dirección local"),
        }

        loop {
            if let Err(e) = self.serve_next() {
                error!(error = %e, "error al aceptar conexión");
            }
        }
    }

    /// Acepta y atiende una sola conexión.
    ///
    /// Solo retorna `Err` si falla el `accept`; los errores de la conexión
    /// se registran y la conexión se cierra.
    pub fn serve_next(&self) -> io::Result<()> {
        let (stream, peer) = self.listener.accept()?;
        info!(%peer, "conexión aceptada");

        let start = Instant::now();
        match self.handle_connection(&stream) {
            Ok(outcome) => {
                let status = outcome.status();
                let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
                if let Outcome::Dynamic { exit } = outcome {
                    info!(%peer, %status, %exit, latency_ms, "respuesta enviada");
                } else if status.is_success() {
                    info!(%peer, %status, latency_ms, "respuesta enviada");
                } else {
                    warn!(%peer, %status, latency_ms, "respuesta de error enviada");
                }
                linger_close(&stream);
            }
            Err(ServeError::ConnectionClosed) => {
                info!(%peer, "el cliente cerró sin enviar request");
            }
            Err(e @ ServeError::Spawn { .. }) => {
                error!(%peer, error = %e, "conexión abortada");
            }
            Err(e) => {
                warn!(%peer, error = %e, "conexión abortada");
            }
        }

        Ok(())
    }

    fn handle_connection(&self, stream: &TcpStream) -> Result<Outcome, ServeError> {
        let timeout = self.config.timeout();
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream.try_clone()?;
        self.dispatcher.dispatch(&mut reader, &mut writer)
    }
}

/// Cierra el lado de escritura y descarta lo que el cliente haya dejado
/// sin leer, para que el cierre no se convierta en un RST que pierda la
/// respuesta.
fn linger_close(stream: &TcpStream) {
    if stream.shutdown(Shutdown::Write).is_err() {
        return;
    }
    if stream.set_read_timeout(Some(LINGER_TIMEOUT)).is_err() {
        return;
    }
    let _ = io::copy(&mut stream.take(LINGER_DRAIN_LIMIT), &mut io::sink());
}
