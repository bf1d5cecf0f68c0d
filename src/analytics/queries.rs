use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::analytics::save_report;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCount {
    pub course: String,
    pub count: usize,
}

/// Cursos que más veces aparecieron en respuestas de recomendación.
pub fn most_recommended_courses(conn: &Connection, limit: usize) -> Result<Vec<CourseCount>> {
    let mut stmt = conn.prepare(
        "SELECT result_ids FROM queries WHERE endpoint = 'recommendations' AND result_ids IS NOT NULL",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let text = row?;
        match serde_json::from_str::<Vec<String>>(&text) {
            Ok(ids) => {
                for id in ids {
                    *counts.entry(id).or_default() += 1;
                }
            }
            Err(e) => warn!(error = %e, "result_ids ilegible en analytics; se omite"),
        }
    }

    let mut out: Vec<CourseCount> = counts
        .into_iter()
        .map(|(course, count)| CourseCount { course, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.course.cmp(&b.course)));
    out.truncate(limit);

    let params = serde_json::json!({ "limit": limit });
    let result = serde_json::to_string(&out)?;
    if let Err(e) = save_report(conn, "most_recommended_courses", &params.to_string(), &result) {
        warn!(error = %e, "no se pudo guardar el reporte");
    }
    Ok(out)
}

pub fn query_count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM queries", [], |row| row.get(0))?)
}
