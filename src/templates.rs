//! Document Families - Templates Are Contracts
//!
//! Each request type maps to one family: the body layout, the GPA floor
//! rule, and the stamp prefix, bound together as plain data. The family
//! set is closed; there is no loading from disk.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::student::Student;

/// The kinds of document a student can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Enrollment,
    Transcript,
}

impl RequestType {
    pub fn label(&self) -> &'static str {
        match self {
            RequestType::Enrollment => "ENROLLMENT",
            RequestType::Transcript => "TRANSCRIPT",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum-GPA rule parameters. Enrollment requires strictly more than the
/// floor; transcript admits the floor itself, so inclusivity is part of
/// the rule, not a convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpaFloor {
    Exclusive(f64),
    Inclusive(f64),
}

impl GpaFloor {
    pub fn admits(&self, gpa: f64) -> bool {
        match *self {
            GpaFloor::Exclusive(min) => gpa > min,
            GpaFloor::Inclusive(min) => gpa >= min,
        }
    }

    /// Human-readable bound, e.g. `> 0.00` or `>= 1.00`.
    pub fn describe(&self) -> String {
        match *self {
            GpaFloor::Exclusive(min) => format!("> {min:.2}"),
            GpaFloor::Inclusive(min) => format!(">= {min:.2}"),
        }
    }
}

/// A document family: everything issuance needs to know about one request
/// type, as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub request_type: RequestType,
    pub title: String,
    #[serde(default)]
    pub include_gpa: bool,
    pub gpa_floor: GpaFloor,
    pub stamp_prefix: String,
    pub template_version: String,
    pub engine_min_version: String,
}

impl DocumentTemplate {
    fn enrollment() -> Self {
        Self {
            request_type: RequestType::Enrollment,
            title: "CONSTANCIA DE MATRÍCULA".to_string(),
            include_gpa: false,
            gpa_floor: GpaFloor::Exclusive(0.0),
            stamp_prefix: "ENR".to_string(),
            template_version: "1.0.0".to_string(),
            engine_min_version: "1.0.0".to_string(),
        }
    }

    fn transcript() -> Self {
        Self {
            request_type: RequestType::Transcript,
            title: "CERTIFICADO DE NOTAS".to_string(),
            include_gpa: true,
            gpa_floor: GpaFloor::Inclusive(1.0),
            stamp_prefix: "TRN".to_string(),
            template_version: "1.0.0".to_string(),
            engine_min_version: "1.0.0".to_string(),
        }
    }

    /// Render the document body for a student on a given issue date.
    ///
    /// Line order is fixed: title, Estudiante, ID, Programa, GPA (families
    /// that carry it), Fecha. Dates render ISO (`YYYY-MM-DD`).
    pub fn render(&self, student: &Student, issue_date: NaiveDate) -> String {
        let mut lines = vec![
            self.title.clone(),
            format!("Estudiante: {}", student.name()),
            format!("ID: {}", student.id()),
            format!("Programa: {}", student.program()),
        ];
        if self.include_gpa {
            lines.push(format!("GPA: {:.2}", student.gpa()));
        }
        lines.push(format!("Fecha: {issue_date}"));
        lines.join("\n")
    }

    fn display_order(&self) -> u8 {
        match self.request_type {
            RequestType::Enrollment => 0,
            RequestType::Transcript => 1,
        }
    }
}

/// Registry of document families, keyed by request type.
pub struct TemplateRegistry {
    templates: HashMap<RequestType, DocumentTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self { templates: HashMap::new() }
    }

    /// Registry with the two built-in families.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DocumentTemplate::enrollment());
        registry.register(DocumentTemplate::transcript());
        registry
    }

    pub fn get(&self, request_type: RequestType) -> Option<&DocumentTemplate> {
        self.templates.get(&request_type)
    }

    pub fn list(&self) -> Vec<&DocumentTemplate> {
        let mut templates: Vec<_> = self.templates.values().collect();
        templates.sort_by_key(|t| t.display_order());
        templates
    }

    pub fn register(&mut self, template: DocumentTemplate) {
        self.templates.insert(template.request_type, template);
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new("UCC-0042", "Alejandro Parra", "Ing. Software", 4.2).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn enrollment_body_layout() {
        let registry = TemplateRegistry::builtin();
        let template = registry.get(RequestType::Enrollment).unwrap();
        let body = template.render(&student(), date());

        assert_eq!(
            body,
            "CONSTANCIA DE MATRÍCULA\n\
             Estudiante: Alejandro Parra\n\
             ID: UCC-0042\n\
             Programa: Ing. Software\n\
             Fecha: 2025-03-15"
        );
    }

    #[test]
    fn transcript_body_has_two_decimal_gpa() {
        let registry = TemplateRegistry::builtin();
        let template = registry.get(RequestType::Transcript).unwrap();
        let body = template.render(&student(), date());

        assert!(body.starts_with("CERTIFICADO DE NOTAS\n"));
        assert!(body.contains("GPA: 4.20"));
        assert!(body.contains("ID: UCC-0042"));
        assert!(body.contains("Programa: Ing. Software"));
        assert!(body.ends_with("Fecha: 2025-03-15"));
    }

    #[test]
    fn gpa_floor_boundaries() {
        let enrollment = GpaFloor::Exclusive(0.0);
        assert!(!enrollment.admits(0.0));
        assert!(enrollment.admits(0.01));

        let transcript = GpaFloor::Inclusive(1.0);
        assert!(!transcript.admits(0.99));
        assert!(transcript.admits(1.0));
    }

    #[test]
    fn request_type_labels() {
        assert_eq!(RequestType::Enrollment.to_string(), "ENROLLMENT");
        assert_eq!(RequestType::Transcript.to_string(), "TRANSCRIPT");
        assert_eq!(
            serde_json::to_string(&RequestType::Transcript).unwrap(),
            "\"TRANSCRIPT\""
        );
    }
}
