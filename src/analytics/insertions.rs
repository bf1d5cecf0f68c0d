use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;

/// Fila de la tabla `queries`.
#[derive(Debug, Clone, Default)]
pub struct QueryRecord {
    pub endpoint: String,
    pub duration_ms: i64,
    pub major: Option<String>,
    pub current_semester: Option<u32>,
    pub passed_count: Option<usize>,
    pub result_count: usize,
    pub result_ids: Vec<String>,
}

pub fn log_query(conn: &Connection, record: &QueryRecord) -> Result<()> {
    let ts = Utc::now().to_rfc3339();
    let result_ids = serde_json::to_string(&record.result_ids)?;
    conn.execute(
        "INSERT INTO queries (
            ts, endpoint, duration_ms, major, current_semester,
            passed_count, result_count, result_ids
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ts,
            record.endpoint,
            record.duration_ms,
            record.major,
            record.current_semester,
            record.passed_count.map(|c| c as i64),
            record.result_count as i64,
            result_ids,
        ],
    )?;
    Ok(())
}

/// Guarda el resultado de un reporte en la tabla `reports`.
pub fn save_report(conn: &Connection, query_type: &str, params_json: &str, result_json: &str) -> Result<()> {
    let ts = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO reports (ts, query_type, params_json, result_json) VALUES (?1, ?2, ?3, ?4)",
        params![ts, query_type, params_json, result_json],
    )?;
    Ok(())
}
