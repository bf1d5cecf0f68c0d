use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::error::Result;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS queries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ts TEXT NOT NULL,
        endpoint TEXT NOT NULL,
        duration_ms INTEGER,
        major TEXT,
        current_semester INTEGER,
        passed_count INTEGER,
        result_count INTEGER,
        result_ids TEXT
    );

    CREATE TABLE IF NOT EXISTS reports (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ts TEXT NOT NULL,
        query_type TEXT NOT NULL,
        params_json TEXT,
        result_json TEXT
    );
";

/// Abre la base (creando el directorio si hace falta) y asegura el esquema.
pub fn open_connection(db_path: &Path) -> Result<Connection> {
    if let Some(dir) = db_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(db_path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Conexión de analytics abierta una sola vez al arrancar y compartida entre
/// workers. Las escrituras se serializan con el mutex.
pub struct AnalyticsStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl AnalyticsStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = open_connection(db_path)?;
        info!(path = %db_path.display(), "base de analytics lista");
        Ok(AnalyticsStore {
            path: db_path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ejecuta `f` con la conexión compartida. Un mutex envenenado no deja la
    /// conexión inutilizable: SQLite ya revirtió la sentencia que falló.
    pub fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let guard = self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&*guard)
    }
}
