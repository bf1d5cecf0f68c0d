use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::parse_body;
use crate::algorithm::{easiest_subjects, summarize_plan};
use crate::api_json::{resolve_course_ids, resolve_transcript, EasyWinsRequest, PlanSummaryRequest};
use crate::models::Plan;
use crate::server::{error_response, AppState};

/// POST /easy-wins
pub async fn easy_wins_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: EasyWinsRequest = match parse_body(body) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let limit = req.limit();
    let transcript = resolve_transcript(req.transcript, &state.catalog);
    let planned = Plan::from_ids(resolve_course_ids(req.planned, &state.catalog));

    let wins = easiest_subjects(&state.catalog, &transcript, &planned, limit);
    HttpResponse::Ok().json(json!({ "easy_wins": wins }))
}

/// POST /plan/summary
pub async fn plan_summary_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: PlanSummaryRequest = match parse_body(body) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let plan = Plan::from_ids(resolve_course_ids(req.planned, &state.catalog));
    HttpResponse::Ok().json(summarize_plan(&state.catalog, &plan, &state.plan))
}
