//! Configuración desde `.env` / variables de entorno.
//!
//! | Variable                     | Default                  |
//! |------------------------------|--------------------------|
//! | `COURSEPATH_DATA`            | `data/catalog.json`      |
//! | `COURSEPATH_BIND`            | `127.0.0.1:8080`         |
//! | `COURSEPATH_UNLOCK_MODE`     | `transitive`             |
//! | `COURSEPATH_UNLOCK_WEIGHT`   | `10` (entre 0 y 1000)    |
//! | `COURSEPATH_FEE_PER_CREDIT`  | `750000`                 |
//! | `COURSEPATH_CREDIT_LIMIT`    | `20`                     |
//! | `COURSEPATH_ANALYTICS_DB`    | `analytics/analytics.db` (`off` la desactiva) |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

use crate::algorithm::scoring::MAX_UNLOCK_WEIGHT;
use crate::algorithm::{PlanSummaryConfig, ScoringConfig, UnlockMode};

pub const DEFAULT_DATA_PATH: &str = "data/catalog.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_ANALYTICS_DB: &str = "analytics/analytics.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub bind: String,
    pub scoring: ScoringConfig,
    pub plan: PlanSummaryConfig,
    pub analytics_db: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind: DEFAULT_BIND.to_string(),
            scoring: ScoringConfig::default(),
            plan: PlanSummaryConfig::default(),
            analytics_db: Some(PathBuf::from(DEFAULT_ANALYTICS_DB)),
        }
    }
}

impl AppConfig {
    /// Carga `.env` si existe y lee las variables del proceso.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función de búsqueda.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(p) = lookup("COURSEPATH_DATA").filter(|s| !s.trim().is_empty()) {
            cfg.data_path = PathBuf::from(p.trim());
        }
        if let Some(b) = lookup("COURSEPATH_BIND").filter(|s| !s.trim().is_empty()) {
            cfg.bind = b.trim().to_string();
        }
        if let Some(mode) = lookup("COURSEPATH_UNLOCK_MODE") {
            match mode.trim().to_lowercase().as_str() {
                "direct" => cfg.scoring.unlock_mode = UnlockMode::Direct,
                "transitive" => cfg.scoring.unlock_mode = UnlockMode::Transitive,
                other => warn!(value = %other, "COURSEPATH_UNLOCK_MODE inválido; se usa 'transitive'"),
            }
        }
        if let Some(w) = parse_var::<i64, _>(&lookup, "COURSEPATH_UNLOCK_WEIGHT") {
            if (0..=MAX_UNLOCK_WEIGHT).contains(&w) {
                cfg.scoring.unlock_weight = w;
            } else {
                warn!(value = w, max = MAX_UNLOCK_WEIGHT, "COURSEPATH_UNLOCK_WEIGHT fuera de rango; se usa el default");
            }
        }
        if let Some(fee) = parse_var::<f64, _>(&lookup, "COURSEPATH_FEE_PER_CREDIT").filter(|f| *f >= 0.0) {
            cfg.plan.fee_per_credit = fee;
        }
        if let Some(limit) = parse_var::<f64, _>(&lookup, "COURSEPATH_CREDIT_LIMIT").filter(|l| *l > 0.0) {
            cfg.plan.credit_limit = limit;
        }
        if let Some(db) = lookup("COURSEPATH_ANALYTICS_DB") {
            let db = db.trim();
            cfg.analytics_db = if db.is_empty() || db.eq_ignore_ascii_case("off") {
                None
            } else {
                Some(PathBuf::from(db))
            };
        }

        cfg
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "valor de configuración inválido; se usa el default");
            None
        }
    }
}
