//! Cálculo de GPA y proyección de créditos necesarios para alcanzar una meta.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::Transcript;

/// Créditos que se suman en cada punto de la curva de proyección.
pub const PROJECTION_STEP_CREDITS: f64 = 3.0;
/// Tope de puntos de la curva, sin importar cuántos créditos falten.
pub const MAX_PROJECTION_POINTS: usize = 50;
/// Créditos promedio de un curso, para estimar "cuántos ramos" faltan.
pub const AVERAGE_COURSE_CREDITS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: f64,
}

/// GPA acumulado. Se ignoran los "no cursado" y los ids fuera del catálogo;
/// una F suma créditos al denominador y cero puntos.
pub fn gpa(transcript: &Transcript, catalog: &Catalog) -> GpaSummary {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;

    for (id, grade) in transcript.iter() {
        let Some(points) = grade.points() else { continue };
        let Some(course) = catalog.get(id) else { continue };
        total_points += points * course.credits;
        total_credits += course.credits;
    }

    let gpa = if total_credits > 0.0 {
        total_points / total_credits
    } else {
        0.0
    };
    GpaSummary { gpa, total_credits }
}

/// Resultado de la búsqueda de meta. `Infeasible` nunca se expresa como
/// número para que nadie lo confunda con una cantidad real de créditos.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CreditsNeeded {
    Reachable { credits: f64 },
    Infeasible,
}

impl CreditsNeeded {
    pub fn credits(&self) -> Option<f64> {
        match self {
            CreditsNeeded::Reachable { credits } => Some(*credits),
            CreditsNeeded::Infeasible => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, CreditsNeeded::Infeasible)
    }

    /// Cantidad aproximada de cursos (truncada), dado un promedio de créditos por curso.
    pub fn approx_courses(&self, avg_course_credits: f64) -> Option<u32> {
        let credits = self.credits()?;
        if avg_course_credits <= 0.0 {
            return None;
        }
        Some((credits / avg_course_credits).floor() as u32)
    }
}

/// Resuelve `x` en `(g·c + p·x) / (c + x) = t`, es decir
/// `x = c·(t − g) / (p − t)`.
pub fn credits_needed(
    current_gpa: f64,
    current_credits: f64,
    target_gpa: f64,
    performance: f64,
) -> CreditsNeeded {
    if ![current_gpa, current_credits, target_gpa, performance]
        .iter()
        .all(|v| v.is_finite())
    {
        return CreditsNeeded::Infeasible;
    }
    if target_gpa <= current_gpa {
        return CreditsNeeded::Reachable { credits: 0.0 };
    }
    if performance <= target_gpa {
        return CreditsNeeded::Infeasible;
    }
    let x = current_credits * (target_gpa - current_gpa) / (performance - target_gpa);
    CreditsNeeded::Reachable { credits: x.max(0.0) }
}

/// Promedio ponderado tras sumar `added` créditos con rendimiento `performance`.
pub fn projected_gpa(current_gpa: f64, current_credits: f64, performance: f64, added: f64) -> f64 {
    let total = current_credits + added;
    if total <= 0.0 {
        return 0.0;
    }
    (current_gpa * current_credits + performance * added) / total
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub cumulative_credits: f64,
    pub projected_gpa: f64,
}

/// Curva perezosa y finita de puntos (créditos, GPA proyectado).
#[derive(Debug, Clone)]
pub struct ProjectionCurve {
    current_gpa: f64,
    current_credits: f64,
    performance: f64,
    next: usize,
    total_points: usize,
}

impl Iterator for ProjectionCurve {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total_points {
            return None;
        }
        let added = self.next as f64 * PROJECTION_STEP_CREDITS;
        self.next += 1;
        Some(ProjectionPoint {
            cumulative_credits: self.current_credits + added,
            projected_gpa: projected_gpa(self.current_gpa, self.current_credits, self.performance, added),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_points - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ProjectionCurve {}

/// Arranca en el punto actual y avanza de a `PROJECTION_STEP_CREDITS` hasta
/// cubrir los créditos necesarios (más dos pasos de margen), con un máximo de
/// `MAX_PROJECTION_POINTS` puntos. Si la meta es inalcanzable se entrega la
/// curva completa hasta el tope.
pub fn projection_curve(
    current_gpa: f64,
    current_credits: f64,
    target_gpa: f64,
    performance: f64,
) -> ProjectionCurve {
    let total_points = match credits_needed(current_gpa, current_credits, target_gpa, performance) {
        CreditsNeeded::Reachable { credits } => {
            let steps = (credits / PROJECTION_STEP_CREDITS).floor();
            let steps = if steps.is_finite() && steps < MAX_PROJECTION_POINTS as f64 {
                steps as usize + 2
            } else {
                MAX_PROJECTION_POINTS
            };
            (steps + 1).min(MAX_PROJECTION_POINTS)
        }
        CreditsNeeded::Infeasible => MAX_PROJECTION_POINTS,
    };

    ProjectionCurve {
        current_gpa,
        current_credits: current_credits.max(0.0),
        performance,
        next: 0,
        total_points,
    }
}

/// Rendimiento futuro asumido.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "preset", content = "value")]
pub enum PerformancePreset {
    /// Todo A.
    AllA,
    /// Mezcla A / B+.
    #[default]
    Strong,
    /// Promedio B.
    Steady,
    Custom(f64),
}

impl PerformancePreset {
    pub fn value(self) -> f64 {
        match self {
            PerformancePreset::AllA => 4.0,
            PerformancePreset::Strong => 3.6,
            PerformancePreset::Steady => 3.0,
            PerformancePreset::Custom(v) if v.is_finite() => v.clamp(0.0, 4.0),
            PerformancePreset::Custom(_) => 0.0,
        }
    }
}
