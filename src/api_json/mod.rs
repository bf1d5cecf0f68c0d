use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use strsim::jaro_winkler;

use crate::algorithm::{gpa, PerformancePreset, DEFAULT_EASY_WIN_LIMIT};
use crate::catalog::{normalize_name, Catalog};
use crate::error::{AdvisorError, Result};
use crate::models::{Plan, StudentProfile, Transcript};

pub mod handlers;

/// Similaridad mínima (Jaro-Winkler) para aceptar un nombre aproximado.
pub const NAME_SIMILARITY_THRESHOLD: f64 = 0.92;
/// Diferencia mínima entre el mejor candidato y el segundo para aceptar el
/// match aproximado.
pub const NAME_TIE_MARGIN: f64 = 0.02;

/// Entrada del motor de recomendación.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "passed": ["CS101", "MATH101"],
///   "failed": ["CS102"],
///   "transcript": {"PHY101": "B+"},
///   "current_semester": 3,
///   "major": "CS",
///   "planned": ["CS201"]
/// }
/// ```
///
/// # Campos:
/// - `passed` / `failed`: ids (o nombres) aprobados y reprobados
/// - `transcript`: opcional; si viene, se derivan de él aprobados y reprobados
///   y se combinan con las listas explícitas
/// - `current_semester`: semestre actual (requerido)
/// - `major`: código de la carrera; vacío si no se usa malla
/// - `planned`: ramos ya elegidos para el próximo periodo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub passed: Vec<String>,
    #[serde(default)]
    pub failed: Vec<String>,
    #[serde(default)]
    pub transcript: Option<Transcript>,
    pub current_semester: u32,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub planned: Vec<String>,
    /// Si es true la respuesta agrupa por nivel de prioridad.
    #[serde(default)]
    pub grouped: bool,
}

impl RecommendationRequest {
    /// Perfil y plan resueltos contra el catálogo.
    pub fn into_profile_and_plan(self, catalog: &Catalog) -> (StudentProfile, Plan) {
        let mut passed = resolve_course_ids(self.passed, catalog);
        let mut failed = resolve_course_ids(self.failed, catalog);

        if let Some(t) = self.transcript {
            let from_t = StudentProfile::from_transcript(&resolve_transcript(t, catalog), self.current_semester, "");
            passed.extend(from_t.passed);
            failed.extend(from_t.failed);
        }

        let profile = StudentProfile::new(passed, failed, self.current_semester, self.major);
        let plan = Plan::from_ids(resolve_course_ids(self.planned, catalog));
        (profile, plan)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpaRequest {
    pub transcript: Transcript,
}

/// Entrada de "créditos necesarios" y de la curva de proyección. Si viene el
/// `transcript`, el GPA y los créditos actuales se calculan desde él.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRequest {
    #[serde(default)]
    pub current_gpa: Option<f64>,
    #[serde(default)]
    pub current_credits: Option<f64>,
    #[serde(default)]
    pub transcript: Option<Transcript>,
    pub target_gpa: f64,
    /// Rendimiento explícito; tiene precedencia sobre `preset`.
    #[serde(default)]
    pub performance: Option<f64>,
    #[serde(default)]
    pub preset: Option<PerformancePreset>,
}

/// Valores numéricos ya resueltos de un `GoalRequest`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGoal {
    pub current_gpa: f64,
    pub current_credits: f64,
    pub target_gpa: f64,
    pub performance: f64,
}

impl GoalRequest {
    pub fn resolve(self, catalog: &Catalog) -> Result<ResolvedGoal> {
        let (current_gpa, current_credits) = match self.transcript {
            Some(t) => {
                let summary = gpa(&resolve_transcript(t, catalog), catalog);
                (summary.gpa, summary.total_credits)
            }
            None => match (self.current_gpa, self.current_credits) {
                (Some(g), Some(c)) => (g, c),
                _ => {
                    return Err(AdvisorError::InvalidInput(
                        "either transcript or current_gpa + current_credits is required".to_string(),
                    ))
                }
            },
        };

        if current_credits < 0.0 {
            return Err(AdvisorError::InvalidInput("current_credits must not be negative".to_string()));
        }

        let performance = match self.performance {
            Some(p) => p,
            None => self.preset.unwrap_or_default().value(),
        };

        Ok(ResolvedGoal {
            current_gpa,
            current_credits,
            target_gpa: self.target_gpa,
            performance,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EasyWinsRequest {
    #[serde(default)]
    pub transcript: Transcript,
    #[serde(default)]
    pub planned: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl EasyWinsRequest {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_EASY_WIN_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummaryRequest {
    #[serde(default)]
    pub planned: Vec<String>,
}

pub fn parse_recommendation_request(json_str: &str) -> Result<RecommendationRequest> {
    Ok(serde_json::from_str::<RecommendationRequest>(json_str)?)
}

/// Intenta mapear un valor ingresado por el usuario a un id del catálogo:
/// id exacto, id sin distinguir mayúsculas, nombre normalizado y por último
/// nombre aproximado (Jaro-Winkler).
///
/// El match aproximado se descarta si los números del nombre (arábigos o
/// romanos) no coinciden, o si dos cursos distintos quedan casi empatados:
/// "Physics 3" nunca debe caer en "Physics 1".
pub fn resolve_course_id(raw: &str, catalog: &Catalog) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if catalog.contains(raw) {
        return Some(raw.to_string());
    }
    let upper = raw.to_uppercase();
    if catalog.contains(&upper) {
        return Some(upper);
    }

    let wanted = normalize_name(raw);
    if wanted.is_empty() {
        return None;
    }
    let wanted_numbers = ordinal_tokens(raw);

    let mut best: Option<(f64, &str)> = None;
    let mut runner_up: f64 = 0.0;
    for course in catalog.courses() {
        let candidate = normalize_name(&course.name);
        if candidate == wanted {
            return Some(course.id.clone());
        }
        if ordinal_tokens(&course.name) != wanted_numbers {
            continue;
        }
        let sim = jaro_winkler(&candidate, &wanted);
        if sim < NAME_SIMILARITY_THRESHOLD {
            continue;
        }
        match best {
            Some((s, _)) if sim <= s => runner_up = runner_up.max(sim),
            Some((s, _)) => {
                runner_up = s;
                best = Some((sim, course.id.as_str()));
            }
            None => best = Some((sim, course.id.as_str())),
        }
    }

    match best {
        Some((s, _)) if s - runner_up < NAME_TIE_MARGIN => None,
        other => other.map(|(_, id)| id.to_string()),
    }
}

/// Números que aparecen en un nombre: dígitos sueltos o pegados ("Physics3")
/// y palabras que son un romano canónico ("IV"). "Civil" no cuenta.
fn ordinal_tokens(name: &str) -> BTreeSet<u32> {
    let mut out = BTreeSet::new();
    for word in name.split(|c: char| !c.is_alphanumeric()) {
        let word = normalize_name(word);
        if word.is_empty() {
            continue;
        }
        let mut digits = String::new();
        for c in word.chars().chain(std::iter::once(' ')) {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if !digits.is_empty() {
                if let Ok(n) = digits.parse::<u32>() {
                    out.insert(n);
                }
                digits.clear();
            }
        }
        if let Some(n) = roman_value(&word) {
            out.insert(n);
        }
    }
    out
}

fn roman_value(word: &str) -> Option<u32> {
    if word.is_empty() || word.len() > 6 {
        return None;
    }
    let mut total = 0u32;
    let mut prev = 0u32;
    for c in word.chars().rev() {
        let v = match c {
            'i' => 1,
            'v' => 5,
            'x' => 10,
            'l' => 50,
            _ => return None,
        };
        if v < prev {
            total = total.checked_sub(v)?;
        } else {
            total += v;
            prev = v;
        }
    }
    // sólo la forma canónica ("iiii" o "il" no son números)
    (total > 0 && to_roman(total) == word).then_some(total)
}

fn to_roman(mut n: u32) -> String {
    const TABLE: [(u32, &str); 7] = [
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (value, sym) in TABLE {
        while n >= value {
            out.push_str(sym);
            n -= value;
        }
    }
    out
}

/// Versión parametrizable: recibe un `resolver` para poder probarla sin
/// catálogo. Los valores que no se resuelven quedan tal cual.
pub fn resolve_ids_with_resolver<F>(ids: Vec<String>, resolver: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    ids.into_iter()
        .map(|r| resolver(&r).unwrap_or_else(|| r.trim().to_string()))
        .filter(|r| !r.is_empty())
        .collect()
}

pub fn resolve_course_ids(ids: Vec<String>, catalog: &Catalog) -> Vec<String> {
    resolve_ids_with_resolver(ids, |r| resolve_course_id(r, catalog))
}

/// Resuelve las claves del historial. Si dos entradas caen en el mismo curso
/// se conserva la mejor nota.
pub fn resolve_transcript(transcript: Transcript, catalog: &Catalog) -> Transcript {
    let mut out: HashMap<String, _> = HashMap::new();
    for (raw, grade) in transcript {
        let id = resolve_course_id(&raw, catalog).unwrap_or(raw);
        out.entry(id)
            .and_modify(|g| {
                if grade < *g {
                    *g = grade;
                }
            })
            .or_insert(grade);
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommendation_minima() {
        let req = parse_recommendation_request(r#"{"current_semester": 2}"#).unwrap();
        assert!(req.passed.is_empty());
        assert!(req.transcript.is_none());
        assert!(!req.grouped);
        assert!(parse_recommendation_request(r#"{"passed": []}"#).is_err());
    }

    #[test]
    fn test_resolver_inyectado() {
        let resolver = |name: &str| -> Option<String> {
            if name.to_lowercase().contains("calculo") {
                Some("MATH101".to_string())
            } else {
                None
            }
        };
        let ids = resolve_ids_with_resolver(
            vec!["Calculo 1".to_string(), " CS999 ".to_string(), "".to_string()],
            resolver,
        );
        assert_eq!(ids, vec!["MATH101".to_string(), "CS999".to_string()]);
    }

    #[test]
    fn test_numeros_en_nombres() {
        let set = |v: &[u32]| v.iter().copied().collect::<BTreeSet<u32>>();
        assert_eq!(ordinal_tokens("Cálculo IV"), set(&[4]));
        assert_eq!(ordinal_tokens("Physics3"), set(&[3]));
        assert_eq!(ordinal_tokens("Giải tích 1"), set(&[1]));
        assert_eq!(ordinal_tokens("Ingeniería Civil"), set(&[]));
        assert_eq!(ordinal_tokens("Data Structures A"), set(&[]));
        assert_eq!(roman_value("xiv"), Some(14));
        assert_eq!(roman_value("iiii"), None);
    }
}
