use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;

use crate::algorithm::UnlockMode;
use crate::models::Course;
use crate::server::AppState;

#[derive(Debug, Serialize)]
struct CourseDetailDto<'a> {
    #[serde(flatten)]
    course: &'a Course,
    direct_prerequisites: BTreeSet<String>,
    dependents: BTreeSet<String>,
    direct_unlocks: usize,
    transitive_unlocks: usize,
}

/// GET /health
pub async fn health_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "courses": state.catalog.len(),
        "edges": state.graph.edge_count(),
    }))
}

/// GET /courses
/// Catálogo completo ordenado por id.
pub async fn courses_list_handler(state: web::Data<AppState>) -> impl Responder {
    let cursos: Vec<&Course> = state.catalog.courses().collect();
    HttpResponse::Ok().json(json!({
        "total": cursos.len(),
        "courses": cursos,
    }))
}

/// GET /courses/{id}
pub async fn course_detail_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let Some(course) = state.catalog.get(&id) else {
        return HttpResponse::NotFound().json(json!({ "error": format!("course '{}' not found", id) }));
    };

    let dto = CourseDetailDto {
        course,
        direct_prerequisites: state.graph.prerequisites_of(&id),
        dependents: state.graph.dependents_of(&id),
        direct_unlocks: state.graph.unlock_power(&id, UnlockMode::Direct),
        transitive_unlocks: state.graph.unlock_power(&id, UnlockMode::Transitive),
    };
    HttpResponse::Ok().json(dto)
}

/// GET /majors/{code}/roadmap
pub async fn roadmap_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let code = path.into_inner();
    match state.catalog.major(&code) {
        Some(major) => HttpResponse::Ok().json(major),
        None => HttpResponse::NotFound().json(json!({ "error": format!("major '{}' not found", code) })),
    }
}

/// GET /integrity
/// Prerequisitos inexistentes y ciclos del grafo.
pub async fn integrity_handler(state: web::Data<AppState>) -> impl Responder {
    let report = state.graph.integrity_report();
    HttpResponse::Ok().json(json!({
        "clean": report.is_clean(),
        "report": report,
    }))
}
