use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::analytics;
use crate::server::{error_response, AppState};

const DEFAULT_REPORT_LIMIT: usize = 20;

/// GET /analytics/top-recommended?limit=N
pub async fn top_recommended_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    if state.analytics.is_none() {
        return HttpResponse::ServiceUnavailable().json(json!({ "error": "analytics disabled" }));
    }
    let limit = query
        .get("limit")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_REPORT_LIMIT);

    let st = state.clone();
    let report = web::block(move || {
        st.analytics
            .as_ref()
            .map(|store| store.with_conn(|conn| analytics::most_recommended_courses(conn, limit)))
    })
    .await;

    match report {
        Ok(Some(Ok(top))) => HttpResponse::Ok().json(json!({ "limit": limit, "courses": top })),
        Ok(Some(Err(e))) => error_response(&e),
        Ok(None) => HttpResponse::ServiceUnavailable().json(json!({ "error": "analytics disabled" })),
        Err(e) => HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })),
    }
}
