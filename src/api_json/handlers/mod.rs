pub mod analytics;
pub mod courses;
pub mod docs;
pub mod gpa;
pub mod plan;
pub mod recommendations;

pub use analytics::*;
pub use courses::*;
pub use docs::*;
pub use gpa::*;
pub use plan::*;
pub use recommendations::*;

use actix_web::web;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Deserializa el cuerpo ya leído como JSON al tipo de entrada del handler.
/// Así los errores de forma (campos faltantes, notas inválidas) salen como
/// 400 con cuerpo `{"error": ...}`.
pub(crate) fn parse_body<T: DeserializeOwned>(body: web::Json<serde_json::Value>) -> Result<T> {
    Ok(serde_json::from_value::<T>(body.into_inner())?)
}
