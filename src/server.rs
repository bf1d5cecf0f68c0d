use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::json;
use tracing::{info, warn};

use crate::algorithm::{DependencyGraph, PlanSummaryConfig, ScoringConfig};
use crate::analytics::{self, AnalyticsStore, QueryRecord};
use crate::api_json::handlers::*;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::error::AdvisorError;

/// Estado compartido (sólo lectura) entre workers: catálogo y grafo se
/// construyen una vez al arrancar.
pub struct AppState {
    pub catalog: Catalog,
    pub graph: DependencyGraph,
    pub scoring: ScoringConfig,
    pub plan: PlanSummaryConfig,
    /// `None` si analytics está deshabilitado o la base no se pudo abrir.
    pub analytics: Option<AnalyticsStore>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: &AppConfig) -> Self {
        let graph = DependencyGraph::from_catalog(&catalog);
        let analytics = config.analytics_db.as_deref().and_then(|db| match AnalyticsStore::open(db) {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(path = %db.display(), error = %e, "analytics deshabilitado: no se pudo abrir la base");
                None
            }
        });
        AppState {
            catalog,
            graph,
            scoring: config.scoring,
            plan: config.plan,
            analytics,
        }
    }

    /// Registra la consulta si analytics está habilitado. Nunca falla.
    /// Bloquea en SQLite: desde un handler se llama dentro de `web::block`.
    pub fn record_query(&self, record: QueryRecord) {
        let Some(store) = &self.analytics else { return };
        if let Err(e) = store.with_conn(|conn| analytics::log_query(conn, &record)) {
            warn!(endpoint = %record.endpoint, error = %e, "no se pudo registrar la consulta en analytics");
        }
    }
}

/// Rutas de la API. Se exporta para reutilizarla en los tests con
/// `actix_web::test`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler))
        .route("/help", web::get().to(help_handler))
        .route("/courses", web::get().to(courses_list_handler))
        .route("/courses/{id}", web::get().to(course_detail_handler))
        .route("/majors/{code}/roadmap", web::get().to(roadmap_handler))
        .route("/integrity", web::get().to(integrity_handler))
        .route("/recommendations", web::post().to(recommendations_handler))
        .route("/gpa", web::post().to(gpa_handler))
        .route("/gpa/credits-needed", web::post().to(credits_needed_handler))
        .route("/gpa/projection", web::post().to(projection_handler))
        .route("/easy-wins", web::post().to(easy_wins_handler))
        .route("/plan/summary", web::post().to(plan_summary_handler))
        .route("/analytics/top-recommended", web::get().to(top_recommended_handler));
}

pub async fn run_server(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    let data = web::Data::new(state);
    info!(bind = %bind_addr, "iniciando servidor");
    HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .bind(bind_addr)?
        .run()
        .await
}

/// Traduce un `AdvisorError` a una respuesta JSON `{"error": ...}`.
pub fn error_response(e: &AdvisorError) -> HttpResponse {
    let body = json!({ "error": e.to_string() });
    match e {
        AdvisorError::Json(_) | AdvisorError::InvalidGrade(_) | AdvisorError::InvalidInput(_) => {
            HttpResponse::BadRequest().json(body)
        }
        AdvisorError::CatalogNotFound(_) => HttpResponse::NotFound().json(body),
        AdvisorError::Io(_) | AdvisorError::Analytics(_) => HttpResponse::InternalServerError().json(body),
    }
}
