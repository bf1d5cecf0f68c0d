use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{Catalog, RawCourse, RawMajor};
use crate::error::{AdvisorError, Result};

/// Normaliza nombres para compararlos: minúsculas, sin acentos comunes ni
/// caracteres no alfanuméricos.
pub fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ả' | 'ã' | 'ạ' | 'â' | 'ă' | 'ä' => 'a',
            'é' | 'è' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'ỉ' | 'ĩ' | 'ị' | 'ï' => 'i',
            'ó' | 'ò' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ơ' | 'ö' => 'o',
            'ú' | 'ù' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ü' => 'u',
            'ñ' => 'n',
            'đ' => 'd',
            other => other,
        })
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Resuelve la ruta de datos: si `preferred` existe se usa tal cual; si no,
/// se intenta el directorio padre (p. ej. `data/catalog.json` -> `data/`).
pub fn resolve_data_path(preferred: &Path) -> Result<PathBuf> {
    if preferred.exists() {
        return Ok(preferred.to_path_buf());
    }
    if let Some(parent) = preferred.parent() {
        if !parent.as_os_str().is_empty() && parent.is_dir() {
            warn!(
                preferred = %preferred.display(),
                fallback = %parent.display(),
                "catálogo no encontrado; usando el directorio"
            );
            return Ok(parent.to_path_buf());
        }
    }
    Err(AdvisorError::CatalogNotFound(preferred.display().to_string()))
}

/// Carga el catálogo desde un archivo JSON o desde un directorio de `*.json`.
///
/// Cada archivo puede contener:
/// - una lista de cursos
/// - un curso suelto
/// - un bundle `{ "majors": {...}, "subjects": {...} | [...] }`
///
/// Los archivos de un directorio que no se pueden leer se registran y se
/// omiten; un archivo único ilegible es un error.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let path = resolve_data_path(path)?;
    let mut records: Vec<RawCourse> = Vec::new();
    let mut majors: BTreeMap<String, RawMajor> = BTreeMap::new();

    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(&path)?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();

        for file in files {
            let parsed = fs::read_to_string(&file)
                .map_err(AdvisorError::from)
                .and_then(|text| serde_json::from_str::<Value>(&text).map_err(AdvisorError::from));
            match parsed {
                Ok(value) => collect_value(value, &mut records, &mut majors),
                Err(e) => warn!(file = %file.display(), error = %e, "no se pudo leer el archivo; se omite"),
            }
        }
    } else {
        let text = fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&text)?;
        collect_value(value, &mut records, &mut majors);
    }

    let catalog = Catalog::from_raw(records, majors);
    info!(
        path = %path.display(),
        courses = catalog.len(),
        majors = catalog.majors().count(),
        "catálogo cargado"
    );
    Ok(catalog)
}

/// Igual que `load_catalog` pero desde un string (un solo documento).
pub fn parse_catalog_str(json: &str) -> Result<Catalog> {
    let value: Value = serde_json::from_str(json)?;
    let mut records = Vec::new();
    let mut majors = BTreeMap::new();
    collect_value(value, &mut records, &mut majors);
    Ok(Catalog::from_raw(records, majors))
}

fn collect_value(value: Value, records: &mut Vec<RawCourse>, majors: &mut BTreeMap<String, RawMajor>) {
    match value {
        Value::Array(items) => {
            for item in items {
                push_record(item, None, records);
            }
        }
        Value::Object(mut map) if map.contains_key("subjects") || map.contains_key("majors") => {
            if let Some(m) = map.remove("majors") {
                match serde_json::from_value::<BTreeMap<String, RawMajor>>(m) {
                    Ok(parsed) => majors.extend(parsed),
                    Err(e) => warn!(error = %e, "sección 'majors' inválida; se ignora"),
                }
            }
            match map.remove("subjects") {
                Some(Value::Array(items)) => {
                    for item in items {
                        push_record(item, None, records);
                    }
                }
                // subjects indexado por id: el id del registro puede venir sólo en la clave
                Some(Value::Object(by_id)) => {
                    for (key, item) in by_id {
                        push_record(item, Some(key), records);
                    }
                }
                Some(_) => warn!("sección 'subjects' con formato desconocido; se ignora"),
                None => {}
            }
        }
        Value::Object(_) => push_record(value, None, records),
        _ => warn!("documento JSON sin cursos; se ignora"),
    }
}

fn push_record(item: Value, key: Option<String>, records: &mut Vec<RawCourse>) {
    match serde_json::from_value::<RawCourse>(item) {
        Ok(mut raw) => {
            if raw.id.is_none() {
                raw.id = key;
            }
            records.push(raw);
        }
        Err(e) => warn!(key = ?key, error = %e, "registro de curso malformado; se descarta"),
    }
}
