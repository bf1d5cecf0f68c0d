use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::parse_body;
use crate::algorithm::gpa::AVERAGE_COURSE_CREDITS;
use crate::algorithm::{credits_needed, gpa, projection_curve, ProjectionPoint};
use crate::api_json::{resolve_transcript, GoalRequest, GpaRequest};
use crate::server::{error_response, AppState};

/// POST /gpa
pub async fn gpa_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: GpaRequest = match parse_body(body) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let transcript = resolve_transcript(req.transcript, &state.catalog);
    HttpResponse::Ok().json(gpa(&transcript, &state.catalog))
}

/// POST /gpa/credits-needed
pub async fn credits_needed_handler(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> impl Responder {
    let goal = match parse_body::<GoalRequest>(body).and_then(|r| r.resolve(&state.catalog)) {
        Ok(g) => g,
        Err(e) => return error_response(&e),
    };

    let needed = credits_needed(goal.current_gpa, goal.current_credits, goal.target_gpa, goal.performance);
    HttpResponse::Ok().json(json!({
        "current_gpa": goal.current_gpa,
        "current_credits": goal.current_credits,
        "target_gpa": goal.target_gpa,
        "performance": goal.performance,
        "result": needed,
        "approx_courses": needed.approx_courses(AVERAGE_COURSE_CREDITS),
    }))
}

/// POST /gpa/projection
pub async fn projection_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let goal = match parse_body::<GoalRequest>(body).and_then(|r| r.resolve(&state.catalog)) {
        Ok(g) => g,
        Err(e) => return error_response(&e),
    };

    let points: Vec<ProjectionPoint> =
        projection_curve(goal.current_gpa, goal.current_credits, goal.target_gpa, goal.performance).collect();
    HttpResponse::Ok().json(json!({
        "result": credits_needed(goal.current_gpa, goal.current_credits, goal.target_gpa, goal.performance),
        "points": points,
    }))
}
