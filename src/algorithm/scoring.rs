// scoring.rs - Motor de elegibilidad y prioridad
//
// Criterios (aditivos, cada uno agrega su razón):
//   1. ramo reprobado            +1000  critical
//   2. atrasado según la malla    +100  critical
//   3. justo en el próximo sem.    +50  recommended
//   4. adelantado                  +10  optional   (sólo si no aplicó 1-3)
//   5. poder de desbloqueo      u * peso
//   6. fallback                      1  optional   (si el total sigue en 0)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::algorithm::graph::{DependencyGraph, UnlockMode};
use crate::catalog::Catalog;
use crate::models::{Course, Plan, PriorityTier, Recommendation, StudentProfile};

pub const RETAKE_SCORE: i64 = 1000;
pub const CATCH_UP_SCORE: i64 = 100;
pub const ON_TRACK_SCORE: i64 = 50;
pub const AHEAD_SCORE: i64 = 10;
pub const FALLBACK_SCORE: i64 = 1;

pub const DEFAULT_UNLOCK_WEIGHT: i64 = 10;
/// Peso máximo aceptado; valores fuera de 0..=MAX se acotan al puntuar.
pub const MAX_UNLOCK_WEIGHT: i64 = 1000;
pub const DEFAULT_UNLOCK_REASON_THRESHOLD: usize = 3;

/// Límites de los grupos de presentación (no afectan el ranking).
pub const CRITICAL_THRESHOLD: i64 = 1000;
pub const RECOMMENDED_THRESHOLD: i64 = 100;

pub const REASON_RETAKE: &str = "must retake";
pub const REASON_CATCH_UP: &str = "overdue from a previous term";
pub const REASON_ON_TRACK: &str = "matches the standard path";
pub const REASON_AHEAD: &str = "advanced elective";
pub const REASON_FALLBACK: &str = "elective / supplementary";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub unlock_mode: UnlockMode,
    pub unlock_weight: i64,
    pub unlock_reason_threshold: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            unlock_mode: UnlockMode::Transitive,
            unlock_weight: DEFAULT_UNLOCK_WEIGHT,
            unlock_reason_threshold: DEFAULT_UNLOCK_REASON_THRESHOLD,
        }
    }
}

pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
    graph: &'a DependencyGraph,
    config: ScoringConfig,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(catalog: &'a Catalog, graph: &'a DependencyGraph) -> Self {
        RecommendationEngine {
            catalog,
            graph,
            config: ScoringConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Cursos elegibles ordenados por score descendente y, a igual score, por
    /// id ascendente.
    pub fn recommend(&self, profile: &StudentProfile, planned: &Plan) -> Vec<Recommendation> {
        let mut out: Vec<Recommendation> = self
            .catalog
            .courses()
            .filter(|c| !profile.passed.contains(&c.id))
            .filter(|c| !planned.contains(&c.id))
            .filter(|c| self.graph.is_eligible(&c.id, &profile.passed))
            .map(|c| self.score_course(c, profile))
            .collect();

        out.sort_by(compare_ranked);
        debug!(
            candidates = out.len(),
            semester = profile.current_semester,
            major = %profile.major,
            "recomendaciones calculadas"
        );
        out
    }

    /// Puntaje de un curso para el perfil dado. No verifica elegibilidad.
    pub fn score_course(&self, course: &Course, profile: &StudentProfile) -> Recommendation {
        let mut score: i64 = 0;
        let mut tier = PriorityTier::Optional;
        let mut reasons: Vec<String> = Vec::new();
        let mut schedule_matched = false;

        if profile.failed.contains(&course.id) {
            score += RETAKE_SCORE;
            tier = tier.max(PriorityTier::Critical);
            reasons.push(REASON_RETAKE.to_string());
            schedule_matched = true;
        }

        let semesters = self.catalog.assigned_semesters(&profile.major, course);
        let current = profile.current_semester;

        if semesters.iter().any(|&s| s < current) {
            score += CATCH_UP_SCORE;
            tier = tier.max(PriorityTier::Critical);
            reasons.push(REASON_CATCH_UP.to_string());
            schedule_matched = true;
        }

        if semesters.contains(&current.saturating_add(1)) {
            score += ON_TRACK_SCORE;
            tier = tier.max(PriorityTier::Recommended);
            reasons.push(REASON_ON_TRACK.to_string());
            schedule_matched = true;
        }

        if !schedule_matched && !semesters.is_empty() {
            score += AHEAD_SCORE;
            reasons.push(REASON_AHEAD.to_string());
        }

        let unlocks = self.graph.unlock_power(&course.id, self.config.unlock_mode);
        let weight = self.config.unlock_weight.clamp(0, MAX_UNLOCK_WEIGHT);
        if unlocks > 0 && weight > 0 {
            let unlock_score = i64::try_from(unlocks).unwrap_or(i64::MAX).saturating_mul(weight);
            score = score.saturating_add(unlock_score);
            if unlocks >= self.config.unlock_reason_threshold {
                reasons.push(format!("unlocks {} follow-on courses", unlocks));
            }
        }

        if score == 0 {
            score = FALLBACK_SCORE;
            tier = PriorityTier::Optional;
            reasons.push(REASON_FALLBACK.to_string());
        }

        Recommendation {
            id: course.id.clone(),
            name: course.name.clone(),
            credits: course.credits,
            difficulty: course.difficulty,
            priority: tier,
            score,
            reasons,
        }
    }
}

fn compare_ranked(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id))
}

impl PriorityTier {
    /// Grupo de presentación según el score bruto.
    pub fn from_score(score: i64) -> Self {
        if score >= CRITICAL_THRESHOLD {
            PriorityTier::Critical
        } else if score >= RECOMMENDED_THRESHOLD {
            PriorityTier::Recommended
        } else {
            PriorityTier::Optional
        }
    }
}

/// Grupo final de una recomendación: el mayor entre su tier explícito y el
/// que le corresponde por score.
pub fn presentation_bucket(rec: &Recommendation) -> PriorityTier {
    rec.priority.max(PriorityTier::from_score(rec.score))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierBuckets {
    pub critical: Vec<Recommendation>,
    pub recommended: Vec<Recommendation>,
    pub optional: Vec<Recommendation>,
}

/// Agrupa una lista ya rankeada sin alterar el orden dentro de cada grupo.
pub fn group_by_tier(recs: &[Recommendation]) -> TierBuckets {
    let mut buckets = TierBuckets::default();
    for r in recs {
        match presentation_bucket(r) {
            PriorityTier::Critical => buckets.critical.push(r.clone()),
            PriorityTier::Recommended => buckets.recommended.push(r.clone()),
            PriorityTier::Optional => buckets.optional.push(r.clone()),
        }
    }
    buckets
}
