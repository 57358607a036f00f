//! Student Records - Validated At The Door
//!
//! A `Student` that exists is a `Student` that passed validation.
//! Deserialization routes through the same constructor, so malformed
//! payloads are rejected at the serde boundary, not downstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grading scale bounds for this registrar's domain.
pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 5.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudentError {
    #[error("Student field '{0}' must not be blank")]
    BlankField(&'static str),

    #[error("GPA {0} outside the [0, 5] grading scale")]
    GpaOutOfRange(String),
}

/// An immutable student record.
///
/// Constructed once via [`Student::new`], never mutated. Field access is
/// read-only; there is no setter surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: String,
    name: String,
    program: String,
    gpa: f64,
}

impl Student {
    /// Build a student record, rejecting blank fields and out-of-scale GPAs.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        program: impl Into<String>,
        gpa: f64,
    ) -> Result<Self, StudentError> {
        let id = id.into();
        let name = name.into();
        let program = program.into();

        check_not_blank("id", &id)?;
        check_not_blank("name", &name)?;
        check_not_blank("program", &program)?;

        if !(GPA_MIN..=GPA_MAX).contains(&gpa) {
            return Err(StudentError::GpaOutOfRange(format!("{gpa}")));
        }

        Ok(Self { id, name, program, gpa })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }
}

fn check_not_blank(field: &'static str, value: &str) -> Result<(), StudentError> {
    if value.trim().is_empty() {
        return Err(StudentError::BlankField(field));
    }
    Ok(())
}

/// Mirror of the serialized shape, used to funnel deserialization through
/// [`Student::new`] so invalid records never exist in memory.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStudent {
    id: String,
    name: String,
    program: String,
    gpa: f64,
}

impl<'de> Deserialize<'de> for Student {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawStudent::deserialize(deserializer)?;
        Student::new(raw.id, raw.name, raw.program, raw.gpa).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_student_stores_fields_unchanged() {
        let s = Student::new("UCC-0042", "Alejandro Parra", "Ing. Software", 4.2).unwrap();
        assert_eq!(s.id(), "UCC-0042");
        assert_eq!(s.name(), "Alejandro Parra");
        assert_eq!(s.program(), "Ing. Software");
        assert_eq!(s.gpa(), 4.2);
    }

    #[test]
    fn blank_fields_rejected() {
        assert_eq!(
            Student::new("", "A", "B", 3.0),
            Err(StudentError::BlankField("id"))
        );
        assert_eq!(
            Student::new("X-1", "   ", "B", 3.0),
            Err(StudentError::BlankField("name"))
        );
        assert_eq!(
            Student::new("X-1", "A", "\t", 3.0),
            Err(StudentError::BlankField("program"))
        );
    }

    #[test]
    fn gpa_scale_boundaries() {
        assert!(Student::new("X-1", "A", "B", 0.0).is_ok());
        assert!(Student::new("X-1", "A", "B", 5.0).is_ok());
        assert!(matches!(
            Student::new("X-1", "A", "B", -0.01),
            Err(StudentError::GpaOutOfRange(_))
        ));
        assert!(matches!(
            Student::new("X-1", "A", "B", 5.01),
            Err(StudentError::GpaOutOfRange(_))
        ));
    }

    #[test]
    fn deserialize_routes_through_constructor() {
        let ok: Result<Student, _> = serde_json::from_str(
            r#"{"id":"UCC-0042","name":"Alejandro Parra","program":"Ing. Software","gpa":4.2}"#,
        );
        assert!(ok.is_ok());

        let bad: Result<Student, _> = serde_json::from_str(
            r#"{"id":"UCC-0042","name":"  ","program":"Ing. Software","gpa":4.2}"#,
        );
        assert!(bad.is_err());

        let out_of_scale: Result<Student, _> = serde_json::from_str(
            r#"{"id":"UCC-0042","name":"A","program":"B","gpa":5.5}"#,
        );
        assert!(out_of_scale.is_err());
    }
}
