//! Tipo de error común del crate.
//!
//! Sólo la frontera (lectura del catálogo, parseo de entradas JSON, base de
//! analytics) puede fallar; los algoritmos del núcleo siempre devuelven un
//! valor definido.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nota que no pertenece a la escala A..F ni al centinela "no cursado".
    #[error("invalid grade '{0}'")]
    InvalidGrade(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("catalog not found at {0}")]
    CatalogNotFound(String),

    #[error("analytics database error: {0}")]
    Analytics(#[from] rusqlite::Error),
}
