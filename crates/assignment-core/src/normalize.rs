//! Maps raw gateway payloads onto canonical entities.
//!
//! Each canonical attribute resolves from an ordered list of candidate
//! fields; the first one present and non-null wins. Missing optional fields
//! never fail normalization: descriptive text becomes [`NOT_SPECIFIED`],
//! scores become 0, student fields come from the fallback profile. Only a
//! structurally wrong payload (not a list, not an object) is an error.

use assignment_gateway::RawPayload;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Course, NormalizationError, Professor, Student};
use crate::fallback;

/// Marker for descriptive fields the service did not provide.
pub const NOT_SPECIFIED: &str = "not specified";

/// Result type for normalization
pub type NormalizeResult<T> = std::result::Result<T, NormalizationError>;

/// Professor recommendation as the service may send it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfessor {
    pub id: Option<Value>,
    pub nombre: Option<Value>,
    pub name: Option<Value>,
    pub puntuacion_compatibilidad: Option<Value>,
    pub score: Option<Value>,
    pub puntuacion: Option<Value>,
    pub especialidad: Option<Value>,
    pub specialty: Option<Value>,
    pub metodologia_preferida: Option<Value>,
    pub metodologia: Option<Value>,
    pub methodology: Option<Value>,
    pub experiencia: Option<Value>,
    pub experience: Option<Value>,
}

impl RawProfessor {
    /// Canonical record; `position` names records that carry neither an id
    /// nor a name.
    pub fn into_canonical(self, position: usize) -> Professor {
        let name = first_text(&[&self.nombre, &self.name]);
        let id = first_text(&[&self.id])
            .or_else(|| name.clone())
            .unwrap_or_else(|| format!("professor-{}", position + 1));
        let score = first_present(&[
            &self.puntuacion_compatibilidad,
            &self.score,
            &self.puntuacion,
        ])
        .and_then(number)
        .map(clamp_score)
        .unwrap_or(0.0);

        Professor {
            id,
            name: name.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            score,
            specialty: first_text(&[&self.especialidad, &self.specialty]).unwrap_or_else(not_specified),
            methodology: first_text(&[
                &self.metodologia_preferida,
                &self.metodologia,
                &self.methodology,
            ])
            .unwrap_or_else(not_specified),
            experience: first_text(&[&self.experiencia, &self.experience]).unwrap_or_else(not_specified),
        }
    }
}

/// Student profile as the service may send it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStudent {
    pub nombre: Option<Value>,
    pub name: Option<Value>,
    pub carne: Option<Value>,
    pub carnet: Option<Value>,
    pub carrera: Option<Value>,
    pub program: Option<Value>,
    pub pensum: Option<Value>,
    pub curriculum: Option<Value>,
    pub promedio_ciclo_anterior: Option<Value>,
    pub promedio: Option<Value>,
    pub grado: Option<Value>,
    pub grade: Option<Value>,
    pub carga_maxima: Option<Value>,
    pub max_load: Option<Value>,
}

impl RawStudent {
    /// Canonical record; every field the service left out is taken from
    /// `defaults`.
    pub fn into_canonical(self, defaults: Student) -> Student {
        let prior_term_average = first_present(&[&self.promedio_ciclo_anterior, &self.promedio])
            .and_then(number)
            .filter(|avg| avg.is_finite())
            .unwrap_or(defaults.prior_term_average);
        let grade_level = first_present(&[&self.grado, &self.grade])
            .and_then(number)
            .filter(|g| g.is_finite() && *g >= 0.0 && *g <= f64::from(u32::MAX))
            .map(|g| g.round() as u32)
            .unwrap_or(defaults.grade_level);

        Student {
            full_name: first_text(&[&self.nombre, &self.name]).unwrap_or(defaults.full_name),
            enrollment_code: first_text(&[&self.carne, &self.carnet])
                .unwrap_or(defaults.enrollment_code),
            program: first_text(&[&self.carrera, &self.program]).unwrap_or(defaults.program),
            curriculum: first_text(&[&self.pensum, &self.curriculum])
                .unwrap_or(defaults.curriculum),
            prior_term_average,
            grade_level,
            max_load: first_text(&[&self.carga_maxima, &self.max_load]).unwrap_or(defaults.max_load),
        }
    }
}

/// Course as the service may send it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCourse {
    pub id: Option<Value>,
    pub codigo: Option<Value>,
    pub code: Option<Value>,
    pub name: Option<Value>,
    pub nombre: Option<Value>,
}

impl RawCourse {
    pub fn into_canonical(self, position: usize) -> Course {
        let code = first_text(&[&self.code, &self.codigo]);
        let name = first_text(&[&self.name, &self.nombre]);
        let id = first_text(&[&self.id])
            .or_else(|| code.clone())
            .or_else(|| name.clone())
            .unwrap_or_else(|| format!("course-{}", position + 1));

        Course {
            code: code.unwrap_or_else(|| id.clone()),
            name: name.unwrap_or_else(|| id.clone()),
            id,
        }
    }
}

/// Normalize a recommendation listing.
pub fn professors(payload: &RawPayload) -> NormalizeResult<Vec<Professor>> {
    let raw: Vec<RawProfessor> = records(payload.as_value(), "professor")?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(position, r)| r.into_canonical(position))
        .collect())
}

/// Normalize a course listing.
pub fn courses(payload: &RawPayload) -> NormalizeResult<Vec<Course>> {
    let raw: Vec<RawCourse> = records(payload.as_value(), "course")?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(position, r)| r.into_canonical(position))
        .collect())
}

/// Normalize a student profile, completing it from the fallback profile.
pub fn student(payload: &RawPayload) -> NormalizeResult<Student> {
    let value = payload.as_value();
    if !value.is_object() {
        return Err(NormalizationError::NotAnObject {
            kind: "student",
            found: json_kind(value),
        });
    }
    let raw = RawStudent::deserialize(value).map_err(|e| NormalizationError::Malformed {
        kind: "student",
        reason: e.to_string(),
    })?;
    Ok(raw.into_canonical(fallback::student()))
}

/// Coerce any score into `[0, 1]`; non-finite input becomes 0.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn records<R: DeserializeOwned>(value: &Value, kind: &'static str) -> NormalizeResult<Vec<R>> {
    let items = value.as_array().ok_or(NormalizationError::NotAList {
        kind,
        found: json_kind(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(NormalizationError::ElementNotAnObject {
                    kind,
                    index,
                    found: json_kind(item),
                });
            }
            R::deserialize(item).map_err(|e| NormalizationError::Malformed {
                kind,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn first_present<'a>(candidates: &[&'a Option<Value>]) -> Option<&'a Value> {
    candidates.iter().find_map(|c| Option::as_ref(*c))
}

/// First candidate that renders as non-blank text.
fn first_text(candidates: &[&Option<Value>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| Option::as_ref(*c))
        .find_map(text)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
