//! Resumen de carga del plan del próximo periodo.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::Plan;

pub const DEFAULT_FEE_PER_CREDIT: f64 = 750_000.0;
pub const DEFAULT_CREDIT_LIMIT: f64 = 20.0;
pub const HEAVY_DIFFICULTY: f64 = 3.5;
pub const LIGHT_DIFFICULTY: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummaryConfig {
    pub fee_per_credit: f64,
    pub credit_limit: f64,
}

impl Default for PlanSummaryConfig {
    fn default() -> Self {
        PlanSummaryConfig {
            fee_per_credit: DEFAULT_FEE_PER_CREDIT,
            credit_limit: DEFAULT_CREDIT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    Light,
    Balanced,
    Heavy,
}

impl Workload {
    pub fn from_average(avg_difficulty: f64) -> Self {
        if avg_difficulty > HEAVY_DIFFICULTY {
            Workload::Heavy
        } else if avg_difficulty < LIGHT_DIFFICULTY {
            Workload::Light
        } else {
            Workload::Balanced
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub course_count: usize,
    pub total_credits: f64,
    pub average_difficulty: f64,
    pub estimated_fee: f64,
    pub credit_limit: f64,
    pub overloaded: bool,
    pub workload: Workload,
    /// Ids del plan que no están en el catálogo.
    pub unknown_ids: Vec<String>,
}

pub fn summarize_plan(catalog: &Catalog, plan: &Plan, config: &PlanSummaryConfig) -> PlanSummary {
    let mut total_credits = 0.0;
    let mut total_difficulty = 0.0;
    let mut course_count = 0usize;
    let mut unknown_ids = Vec::new();

    for id in plan.iter() {
        match catalog.get(id) {
            Some(c) => {
                total_credits += c.credits;
                total_difficulty += c.difficulty as f64;
                course_count += 1;
            }
            None => unknown_ids.push(id.clone()),
        }
    }

    let average_difficulty = if course_count > 0 {
        total_difficulty / course_count as f64
    } else {
        0.0
    };

    PlanSummary {
        course_count,
        total_credits,
        average_difficulty,
        estimated_fee: total_credits * config.fee_per_credit,
        credit_limit: config.credit_limit,
        overloaded: total_credits > config.credit_limit,
        // plan vacío: sin carga
        workload: if course_count == 0 {
            Workload::Light
        } else {
            Workload::from_average(average_difficulty)
        },
        unknown_ids,
    }
}
