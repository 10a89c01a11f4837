//! Canonical defaults used whenever live data is unavailable or unusable.
//!
//! Every function is pure: same output on every call, no clock, no
//! randomness.

use crate::domain::{Course, Professor, Student};

/// Identity the workflow runs as when nothing else is known.
pub const DEFAULT_STUDENT_NAME: &str = "JEREZ MELGAR, ALEJANDRO MANUEL";

pub fn student() -> Student {
    Student {
        full_name: DEFAULT_STUDENT_NAME.to_string(),
        enrollment_code: "2023-12345".to_string(),
        program: "7010 - LICENCIATURA EN INGENIERÍA EN CIENCIA DE LA COMPUTACIÓN Y TECNOLOGÍAS DE LA INFORMACIÓN".to_string(),
        curriculum: "RENOVACIÓN CURRICULAR 2022".to_string(),
        prior_term_average: 90.0,
        grade_level: 2,
        max_load: "Puede asignarse un máximo de 8 cursos".to_string(),
    }
}

pub fn courses() -> Vec<Course> {
    [
        ("CALC1", "Cálculo 1", "MAT101"),
        ("ALG1", "Álgebra Lineal 1", "MAT102"),
        ("EST1", "Estadística 1", "EST101"),
    ]
    .into_iter()
    .map(|(id, name, code)| Course {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
    })
    .collect()
}

pub fn professors() -> Vec<Professor> {
    [
        ("prof1", "Dr. María González", 0.95, "Matemáticas", "Práctica", "10 años"),
        ("prof2", "Ing. Carlos Rodríguez", 0.87, "Matemáticas Aplicadas", "Teórica", "8 años"),
        ("prof3", "Dra. Ana Martínez", 0.82, "Álgebra", "Mixta", "12 años"),
    ]
    .into_iter()
    .map(
        |(id, name, score, specialty, methodology, experience)| Professor {
            id: id.to_string(),
            name: name.to_string(),
            score,
            specialty: specialty.to_string(),
            methodology: methodology.to_string(),
            experience: experience.to_string(),
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::duplicate_ids;

    #[test]
    fn test_fallback_is_deterministic() {
        assert_eq!(student(), student());
        assert_eq!(courses(), courses());
        assert_eq!(professors(), professors());
    }

    #[test]
    fn test_fallback_records_are_canonical() {
        assert!(!courses().is_empty());
        assert!(duplicate_ids(&courses()).is_empty());
        assert!(duplicate_ids(&professors()).is_empty());
        for professor in professors() {
            assert!((0.0..=1.0).contains(&professor.score));
            assert!(!professor.name.is_empty());
        }
    }

    #[test]
    fn test_fallback_student_identity() {
        let student = student();
        assert_eq!(student.full_name, DEFAULT_STUDENT_NAME);
        assert_eq!(student.enrollment_code, "2023-12345");
        assert_eq!(student.grade_level, 2);
    }
}
