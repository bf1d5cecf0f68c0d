use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::{Plan, Transcript};

pub const DEFAULT_EASY_WIN_LIMIT: usize = 4;

/// Curso sugerido para subir el promedio con poco esfuerzo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EasyWin {
    pub id: String,
    pub name: String,
    pub credits: f64,
    pub difficulty: u8,
}

/// Cursos fuera del historial y del plan, de menor a mayor dificultad; a igual
/// dificultad primero los de más créditos (y luego por id).
pub fn easiest_subjects(
    catalog: &Catalog,
    transcript: &Transcript,
    planned: &Plan,
    limit: usize,
) -> Vec<EasyWin> {
    let mut candidates: Vec<EasyWin> = catalog
        .courses()
        .filter(|c| !transcript.contains_key(&c.id) && !planned.contains(&c.id))
        .map(|c| EasyWin {
            id: c.id.clone(),
            name: c.name.clone(),
            credits: c.credits,
            difficulty: c.difficulty,
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.difficulty
            .cmp(&b.difficulty)
            .then_with(|| b.credits.total_cmp(&a.credits))
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.truncate(limit);
    candidates
}
