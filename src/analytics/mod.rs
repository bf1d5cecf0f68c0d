//! Registro best-effort de consultas en SQLite y reportes sobre él. La
//! conexión se abre una vez (`AnalyticsStore`) y se reutiliza.
//!
//! Ningún fallo de esta capa llega al usuario: los handlers sólo registran un
//! warning si no se pudo escribir.

pub mod db;
pub mod insertions;
pub mod queries;

pub use db::{open_connection, AnalyticsStore};
pub use insertions::{log_query, save_report, QueryRecord};
pub use queries::{most_recommended_courses, query_count, CourseCount};
