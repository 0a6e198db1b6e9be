//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./tiny 8000 --root ./www --cgi-dir cgi-bin --timeout-secs 10
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! TINY_PORT=8000 TINY_ROOT=./www ./tiny
//! ```

use clap::Parser;
use std::time::Duration;
use tracing::info;

/// Niveles de log aceptados por `--log-level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuración del servidor Tiny
#[derive(Debug, Clone, Parser)]
#[command(name = "tiny")]
#[command(about = "Servidor HTTP/1.0 iterativo: contenido estático y dinámico (CGI)")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(value_name = "PORT", env = "TINY_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "TINY_HOST")]
    pub host: String,

    /// Prefijo que se antepone a cada URI para obtener el path
    #[arg(long = "root", default_value = ".", env = "TINY_ROOT")]
    pub doc_root: String,

    /// Substring del URI que marca contenido dinámico
    #[arg(long = "cgi-dir", default_value = "cgi-bin", env = "TINY_CGI_DIR")]
    pub cgi_marker: String,

    /// Archivo servido cuando el URI termina en '/'
    #[arg(long = "index", default_value = "index.html", env = "TINY_INDEX")]
    pub index_file: String,

    /// Timeout de lectura/escritura por conexión en segundos (0 = sin timeout)
    #[arg(long = "timeout-secs", default_value = "30", env = "TINY_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Nivel de log (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "TINY_LOG")]
    pub log_level: String,
}

impl Config {
    /// Crea la configuración parseando argumentos CLI.
    ///
    /// Si falta el puerto o no es un número, clap imprime el uso en
    /// stderr y termina el proceso con código distinto de cero.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use tiny_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout por conexión, `None` si está deshabilitado
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.doc_root.is_empty() {
            return Err("Document root must not be empty".to_string());
        }
        if self.cgi_marker.is_empty() {
            return Err("CGI marker must not be empty".to_string());
        }
        if self.index_file.is_empty() || self.index_file.contains('/') {
            return Err("Index file must be a plain file name".to_string());
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "Log level must be one of: {}",
                LOG_LEVELS.join(", ")
            ));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!(
            address = %self.address(),
            root = %self.doc_root,
            cgi_dir = %self.cgi_marker,
            index = %self.index_file,
            timeout_secs = self.timeout_secs,
            "configuración"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            doc_root: ".".to_string(),
            cgi_marker: "cgi-bin".to_string(),
            index_file: "index.html".to_string(),
            timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.doc_root, ".");
        assert_eq!(config.cgi_marker, "cgi-bin");
        assert_eq!(config.index_file, "index.html");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    // ==================== CLI Parsing ====================

    #[test]
    fn test_parse_port_only() {
        let config = Config::try_parse_from(["tiny", "8080"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.doc_root, ".");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_parse_all_flags() {
        let config = Config::try_parse_from([
            "tiny", "9000", "--host", "127.0.0.1", "--root", "/srv/www",
            "--cgi-dir", "dyn", "--index", "home.html", "--timeout-secs", "0",
            "--log-level", "debug",
        ])
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:9000");
        assert_eq!(config.doc_root, "/srv/www");
        assert_eq!(config.cgi_marker, "dyn");
        assert_eq!(config.index_file, "home.html");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_parse_missing_port() {
        if std::env::var_os("TINY_PORT").is_some() {
            return;
        }
        assert!(Config::try_parse_from(["tiny"]).is_err());
    }

    #[test]
    fn test_parse_malformed_port() {
        assert!(Config::try_parse_from(["tiny", "eighty"]).is_err());
        assert!(Config::try_parse_from(["tiny", "70000"]).is_err());
    }

    // ==================== Validation ====================

    #[test]
    fn test_validate_empty_root() {
        let mut config = Config::default();
        config.doc_root = String::new();
        assert!(config.validate().unwrap_err().contains("Document root"));
    }

    #[test]
    fn test_validate_empty_marker() {
        let mut config = Config::default();
        config.cgi_marker = String::new();
        assert!(config.validate().unwrap_err().contains("CGI marker"));
    }

    #[test]
    fn test_validate_index_with_slash() {
        let mut config = Config::default();
        config.index_file = "docs/index.html".to_string();
        assert!(config.validate().unwrap_err().contains("Index file"));
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::default();
        config.log_level = "WARN".to_string();
        assert!(config.validate().is_ok());

        config.log_level = "loud".to_string();
        assert!(config.validate().unwrap_err().contains("Log level"));
    }

    // ==================== Timeouts ====================

    #[test]
    fn test_timeout() {
        let mut config = Config::default();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

        config.timeout_secs = 0;
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_log_summary() {
        // Should not panic
        Config::default().log_summary();
    }
}
