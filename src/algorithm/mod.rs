// Módulo de alto nivel: grafo de dependencias, motor de recomendación y
// cálculos académicos (GPA, ramos fáciles, resumen del plan).
pub mod easy_wins;
pub mod gpa;
pub mod graph;
pub mod plan;
pub mod scoring;

pub use easy_wins::{easiest_subjects, EasyWin, DEFAULT_EASY_WIN_LIMIT};
pub use gpa::{
    credits_needed, gpa, projected_gpa, projection_curve, CreditsNeeded, GpaSummary,
    PerformancePreset, ProjectionCurve, ProjectionPoint,
};
pub use graph::{DanglingEdge, DependencyGraph, IntegrityReport, UnlockMode};
pub use plan::{summarize_plan, PlanSummary, PlanSummaryConfig, Workload};
pub use scoring::{group_by_tier, presentation_bucket, RecommendationEngine, ScoringConfig, TierBuckets};
