use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::time::Instant;
use tracing::warn;

use super::parse_body;
use crate::algorithm::{group_by_tier, RecommendationEngine};
use crate::analytics::QueryRecord;
use crate::api_json::RecommendationRequest;
use crate::server::{error_response, AppState};

/// POST /recommendations
/// Espera un JSON con la forma de `RecommendationRequest`. Devuelve la lista
/// rankeada (o agrupada por prioridad si `grouped` es true).
pub async fn recommendations_handler(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let started = Instant::now();
    let req: RecommendationRequest = match parse_body(body) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let grouped = req.grouped;

    let (profile, plan) = req.into_profile_and_plan(&state.catalog);
    let engine = RecommendationEngine::new(&state.catalog, &state.graph).with_config(state.scoring);
    let recs = engine.recommend(&profile, &plan);

    let record = QueryRecord {
        endpoint: "recommendations".to_string(),
        duration_ms: started.elapsed().as_millis() as i64,
        major: Some(profile.major.clone()).filter(|m| !m.is_empty()),
        current_semester: Some(profile.current_semester),
        passed_count: Some(profile.passed.len()),
        result_count: recs.len(),
        result_ids: recs.iter().map(|r| r.id.clone()).collect(),
    };
    if state.analytics.is_some() {
        let st = state.clone();
        if let Err(e) = web::block(move || st.record_query(record)).await {
            warn!(error = %e, "registro de analytics cancelado");
        }
    }

    if grouped {
        return HttpResponse::Ok().json(json!({
            "total": recs.len(),
            "groups": group_by_tier(&recs),
        }));
    }

    HttpResponse::Ok().json(json!({
        "total": recs.len(),
        "recommendations": recs,
    }))
}
