//! # Clasificación de URIs
//! src/router/mod.rs
//!
//! Decide si un URI pide contenido estático o dinámico y lo traduce a un
//! path del filesystem.
//!
//! ```text
//! /home.html            → Static  ./home.html
//! /docs/                → Static  ./docs/index.html
//! /cgi-bin/adder?2&3    → Dynamic ./cgi-bin/adder  (args "2&3")
//! ```

use std::path::{Component, Path, PathBuf};

/// Tipo de contenido pedido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Archivo servido byte a byte
    Static,

    /// Salida de un programa CGI
    Dynamic,
}

/// Resultado de clasificar un URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    path: PathBuf,
    args: String,
    kind: ContentKind,
}

impl Target {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Argumentos para el programa CGI (vacío para contenido estático)
    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// `true` si el path tiene un componente `..`
    pub fn escapes_root(&self) -> bool {
        self.path.components().any(|c| c == Component::ParentDir)
    }
}

/// Traduce URIs a `Target` a partir del document root
#[derive(Debug, Clone)]
pub struct Router {
    /// Prefijo de todos los paths (ej: ".")
    doc_root: String,

    /// Substring que marca contenido dinámico (ej: "cgi-bin")
    cgi_marker: String,

    /// Archivo que se agrega cuando el URI termina en '/'
    index_file: String,
}

impl Router {
    pub fn new(doc_root: &str, cgi_marker: &str, index_file: &str) -> Self {
        Self {
            doc_root: doc_root.to_string(),
            cgi_marker: cgi_marker.to_string(),
            index_file: index_file.to_string(),
        }
    }

    /// Clasifica un URI
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_server::router::{ContentKind, Router};
    ///
    /// let router = Router::default();
    /// let target = router.classify("/cgi-bin/adder?2&3");
    ///
    /// assert_eq!(target.kind(), ContentKind::Dynamic);
    /// assert_eq!(target.path().to_str(), Some("./cgi-bin/adder"));
    /// assert_eq!(target.args(), "2&3");
    /// ```
    pub fn classify(&self, uri: &str) -> Target {
        // Un URI vacío o sin '/' inicial produce un path vacío: stat("")
        // siempre falla. Sin el '/' el URI se pegaría al nombre del root
        // ("/srv/www" + "-x" = "/srv/www-x").
        if !uri.starts_with('/') {
            return Target {
                path: PathBuf::new(),
                args: String::new(),
                kind: ContentKind::Static,
            };
        }

        if uri.contains(&self.cgi_marker) {
            let (program, args) = uri.split_once('?').unwrap_or((uri, ""));
            Target {
                path: PathBuf::from(format!("{}{}", self.doc_root, program)),
                args: args.to_string(),
                kind: ContentKind::Dynamic,
            }
        } else {
            let mut path = format!("{}{}", self.doc_root, uri);
            if uri.ends_with('/') {
                path.push_str(&self.index_file);
            }
            Target {
                path: PathBuf::from(path),
                args: String::new(),
                kind: ContentKind::Static,
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(".", "cgi-bin", "index.html")
    }
}
