// Biblioteca raíz del crate `coursepath`.
// Catálogo -> grafo de dependencias -> motor de recomendación, más los
// cálculos de GPA, ramos fáciles y resumen del plan. El servidor HTTP es sólo
// la capa que expone esas operaciones como JSON.
pub mod algorithm;
pub mod analytics;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod server;

pub use algorithm::{DependencyGraph, RecommendationEngine, ScoringConfig, UnlockMode};
pub use catalog::{load_catalog, Catalog};
pub use config::AppConfig;
pub use error::{AdvisorError, Result};
pub use models::{Course, Grade, Plan, PriorityTier, Recommendation, StudentProfile, Transcript};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
