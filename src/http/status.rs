//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Códigos de estado HTTP/1.0 que el servidor puede enviar. Según el
//! RFC 1945 se agrupan en categorías:
//!
//! - **2xx**: Éxito (200 OK)
//! - **4xx**: Error del cliente (400, 403, 404)
//! - **5xx**: Error del servidor (501)

/// Códigos de estado que genera el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - Contenido estático o dinámico servido
    Ok = 200,

    /// 400 Bad Request - Request line malformada
    BadRequest = 400,

    /// 403 Forbidden - Sin permiso de lectura/ejecución, o fuera del document root
    Forbidden = 403,

    /// 404 Not Found - El archivo no existe
    NotFound = 404,

    /// 501 Not Implemented - Método distinto de GET
    NotImplemented = 501,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_server::http::StatusCode;
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
