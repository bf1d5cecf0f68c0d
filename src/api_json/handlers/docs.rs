use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// GET /help
/// Lista de endpoints con un ejemplo de entrada para los POST.
pub async fn help_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "description": "API de recomendación de cursos: ranking por prioridad, GPA, metas de GPA, ramos fáciles y resumen del plan.",
        "endpoints": {
            "GET /health": "estado y tamaño del catálogo",
            "GET /courses": "catálogo completo",
            "GET /courses/{id}": "curso con prerequisitos, dependientes y poder de desbloqueo",
            "GET /majors/{code}/roadmap": "malla de una carrera",
            "GET /integrity": "prerequisitos inexistentes y ciclos",
            "POST /recommendations": "ranking de cursos elegibles",
            "POST /gpa": "GPA acumulado y créditos contados",
            "POST /gpa/credits-needed": "créditos necesarios para una meta",
            "POST /gpa/projection": "curva de proyección del GPA",
            "POST /easy-wins": "cursos menos difíciles aún no cursados",
            "POST /plan/summary": "carga del plan del próximo periodo",
            "GET /analytics/top-recommended": "cursos más recomendados"
        },
        "examples": {
            "recommendations": {
                "passed": ["CS101", "MATH101"],
                "failed": ["CS102"],
                "current_semester": 2,
                "major": "CS",
                "planned": [],
                "grouped": false
            },
            "gpa": { "transcript": { "CS101": "A", "CS102": "F", "MATH101": "B+" } },
            "credits_needed": {
                "current_gpa": 3.0,
                "current_credits": 60,
                "target_gpa": 3.2,
                "preset": { "preset": "strong" }
            },
            "easy_wins": { "transcript": { "CS101": "A" }, "planned": ["CS201"], "limit": 4 },
            "plan_summary": { "planned": ["CS201", "MATH102"] }
        },
        "grades": ["A", "B+", "B", "C+", "C", "D+", "D", "F", "NOT_TAKEN"]
    }))
}
