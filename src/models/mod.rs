// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::AdvisorError;

/// Dificultad asumida cuando el registro no la declara (escala 1-5).
pub const DEFAULT_DIFFICULTY: u8 = 3;
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

/// Curso ya validado por el catálogo. Inmutable una vez cargado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub credits: f64,
    pub difficulty: u8,
    pub prerequisites: BTreeSet<String>,
    /// Semestres en los que se dicta. Vacío => nunca cuenta como "al día" ni "atrasado".
    pub semesters_offered: BTreeSet<u32>,
}

/// Escala de notas. `NotTaken` es el centinela de "no cursado": no entra ni en
/// el numerador ni en el denominador del GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    A,
    BPlus,
    B,
    CPlus,
    C,
    DPlus,
    D,
    F,
    NotTaken,
}

impl Grade {
    pub const SCALE: [Grade; 8] = [
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    /// Puntos de la nota, `None` para el centinela.
    pub fn points(self) -> Option<f64> {
        match self {
            Grade::A => Some(4.0),
            Grade::BPlus => Some(3.5),
            Grade::B => Some(3.0),
            Grade::CPlus => Some(2.5),
            Grade::C => Some(2.0),
            Grade::DPlus => Some(1.5),
            Grade::D => Some(1.0),
            Grade::F => Some(0.0),
            Grade::NotTaken => None,
        }
    }

    /// Cualquier nota distinta de F y de "no cursado" aprueba.
    pub fn is_passing(self) -> bool {
        !matches!(self, Grade::F | Grade::NotTaken)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NotTaken => "NOT_TAKEN",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t.to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "D+" => Ok(Grade::DPlus),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            // "Chưa học": centinela de los historiales exportados en vietnamita
            "" | "-" | "N/A" | "NOT_TAKEN" | "NOT TAKEN" | "CHƯA HỌC" => Ok(Grade::NotTaken),
            _ => Err(AdvisorError::InvalidGrade(t.to_string())),
        }
    }
}

impl TryFrom<String> for Grade {
    type Error = AdvisorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(g: Grade) -> Self {
        g.as_str().to_string()
    }
}

/// Historial: curso -> nota. Ordenado para que todo cálculo sea determinista.
pub type Transcript = BTreeMap<String, Grade>;

/// Perfil académico del estudiante. `passed` y `failed` son disjuntos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub passed: BTreeSet<String>,
    #[serde(default)]
    pub failed: BTreeSet<String>,
    pub current_semester: u32,
    #[serde(default)]
    pub major: String,
}

impl StudentProfile {
    /// Construye el perfil garantizando que un ramo aprobado no siga como reprobado.
    pub fn new(
        passed: impl IntoIterator<Item = String>,
        failed: impl IntoIterator<Item = String>,
        current_semester: u32,
        major: impl Into<String>,
    ) -> Self {
        let passed: BTreeSet<String> = passed.into_iter().collect();
        let failed: BTreeSet<String> = failed
            .into_iter()
            .filter(|id| !passed.contains(id))
            .collect();
        StudentProfile {
            passed,
            failed,
            current_semester,
            major: major.into(),
        }
    }

    /// Deriva aprobados/reprobados desde un historial de notas.
    pub fn from_transcript(
        transcript: &Transcript,
        current_semester: u32,
        major: impl Into<String>,
    ) -> Self {
        let passed = transcript
            .iter()
            .filter(|(_, g)| g.is_passing())
            .map(|(id, _)| id.clone());
        let failed = transcript
            .iter()
            .filter(|(_, g)| **g == Grade::F)
            .map(|(id, _)| id.clone());
        StudentProfile::new(passed.collect::<Vec<_>>(), failed.collect::<Vec<_>>(), current_semester, major)
    }

    /// Registra un ramo aprobado (p. ej. tras rendirlo de nuevo).
    pub fn mark_passed(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.failed.remove(&id);
        self.passed.insert(id);
        self
    }
}

/// Ramos que el estudiante planea tomar el próximo periodo. Es un valor: cada
/// modificación devuelve un plan nuevo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    courses: BTreeSet<String>,
}

impl Plan {
    pub fn new() -> Self {
        Plan::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        Plan { courses: ids.into_iter().collect() }
    }

    pub fn with_course(mut self, id: impl Into<String>) -> Self {
        self.courses.insert(id.into());
        self
    }

    pub fn without_course(mut self, id: &str) -> Self {
        self.courses.remove(id);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Nivel de prioridad. El orden de declaración define el orden (Optional < Critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Optional,
    Recommended,
    Critical,
}

/// Registro de salida del motor de recomendación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub credits: f64,
    pub difficulty: u8,
    pub priority: PriorityTier,
    pub score: i64,
    pub reasons: Vec<String>,
}
