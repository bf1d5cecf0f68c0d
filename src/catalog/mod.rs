//! Catálogo de cursos y mallas (roadmaps) por carrera.
//!
//! Submódulos:
//! - `io`: lectura de los JSON en disco (archivo único o directorio)
//!
//! El catálogo se construye una sola vez y después sólo se lee: los registros
//! crudos (`RawCourse`, con campos opcionales) se validan aquí y el resto del
//! crate trabaja con `Course` ya normalizado.

mod io;

pub use io::{load_catalog, normalize_name, parse_catalog_str, resolve_data_path};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

use crate::models::{Course, DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Registro tal como viene del almacenamiento.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCourse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default)]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default)]
    pub semesters_offered: Option<Vec<u32>>,
}

/// Carrera tal como viene del almacenamiento: las claves de la malla son
/// strings ("1", "2", ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMajor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roadmap: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Major {
    pub code: String,
    pub name: Option<String>,
    /// semestre -> cursos recomendados, en el orden de la malla
    pub roadmap: BTreeMap<u32, Vec<String>>,
    #[serde(skip)]
    semester_index: HashMap<String, BTreeSet<u32>>,
}

impl Major {
    pub fn new(code: impl Into<String>, name: Option<String>, roadmap: BTreeMap<u32, Vec<String>>) -> Self {
        let mut semester_index: HashMap<String, BTreeSet<u32>> = HashMap::new();
        for (sem, ids) in roadmap.iter() {
            for id in ids {
                semester_index.entry(id.clone()).or_default().insert(*sem);
            }
        }
        Major {
            code: code.into(),
            name,
            roadmap,
            semester_index,
        }
    }

    /// Semestres de la malla en los que aparece el curso (vacío si no aparece).
    pub fn semesters_for(&self, course_id: &str) -> Option<&BTreeSet<u32>> {
        self.semester_index.get(course_id)
    }
}

/// Catálogo inmutable. Se pasa por referencia al grafo y al motor.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: BTreeMap<String, Course>,
    majors: BTreeMap<String, Major>,
}

impl Catalog {
    /// Valida los registros crudos. Los inválidos se descartan con un warning;
    /// nunca abortan la carga completa.
    pub fn from_raw(records: Vec<RawCourse>, majors: BTreeMap<String, RawMajor>) -> Self {
        let mut courses: BTreeMap<String, Course> = BTreeMap::new();
        let mut dropped = 0usize;

        for raw in records {
            match validate_course(raw) {
                Some(course) => {
                    if courses.contains_key(&course.id) {
                        warn!(id = %course.id, "curso duplicado en el catálogo; se conserva la primera definición");
                        dropped += 1;
                        continue;
                    }
                    courses.insert(course.id.clone(), course);
                }
                None => dropped += 1,
            }
        }

        let mut parsed_majors: BTreeMap<String, Major> = BTreeMap::new();
        for (code, raw) in majors {
            let mut roadmap: BTreeMap<u32, Vec<String>> = BTreeMap::new();
            for (sem_key, ids) in raw.roadmap {
                match sem_key.trim().parse::<u32>() {
                    Ok(sem) => roadmap.entry(sem).or_default().extend(ids),
                    Err(_) => warn!(major = %code, semester = %sem_key, "semestre no numérico en la malla; se ignora"),
                }
            }
            parsed_majors.insert(code.clone(), Major::new(code, raw.name, roadmap));
        }

        debug!(
            courses = courses.len(),
            majors = parsed_majors.len(),
            dropped,
            "catálogo construido"
        );

        Catalog {
            courses,
            majors: parsed_majors,
        }
    }

    /// Atajo para construir el catálogo con cursos ya validados (tests, herramientas).
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        Catalog {
            courses: courses.into_iter().map(|c| (c.id.clone(), c)).collect(),
            majors: BTreeMap::new(),
        }
    }

    pub fn with_major(mut self, major: Major) -> Self {
        self.majors.insert(major.code.clone(), major);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    /// Cursos en orden ascendente de id.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn major(&self, code: &str) -> Option<&Major> {
        self.majors.get(code)
    }

    pub fn majors(&self) -> impl Iterator<Item = &Major> {
        self.majors.values()
    }

    /// Semestres "asignados" a un curso para una carrera: los de la malla si
    /// la carrera lo incluye, si no los semestres en que se dicta.
    pub fn assigned_semesters(&self, major_code: &str, course: &Course) -> BTreeSet<u32> {
        self.major(major_code)
            .and_then(|m| m.semesters_for(&course.id))
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| course.semesters_offered.clone())
    }
}

fn validate_course(raw: RawCourse) -> Option<Course> {
    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            warn!(name = ?raw.name, "registro sin id; se descarta");
            return None;
        }
    };

    let name = match raw.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            warn!(%id, "registro sin nombre; se descarta");
            return None;
        }
    };

    let credits = match raw.credits {
        Some(c) if c.is_finite() && c > 0.0 => c,
        other => {
            warn!(%id, credits = ?other, "créditos ausentes o no positivos; se descarta");
            return None;
        }
    };

    let difficulty = match raw.difficulty {
        Some(d) if d.is_finite() => {
            let rounded = d.round().clamp(MIN_DIFFICULTY as f64, MAX_DIFFICULTY as f64) as u8;
            if (rounded as f64 - d).abs() > f64::EPSILON {
                debug!(%id, declared = d, used = rounded, "dificultad ajustada a la escala 1-5");
            }
            rounded
        }
        _ => DEFAULT_DIFFICULTY,
    };

    let prerequisites: BTreeSet<String> = raw
        .prerequisites
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    Some(Course {
        id,
        name,
        credits,
        difficulty,
        prerequisites,
        semesters_offered: raw.semesters_offered.unwrap_or_default().into_iter().collect(),
    })
}
