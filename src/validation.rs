//! Validation System - Rules Produce Violations
//!
//! Rules inspect a student against a family and report structured
//! violations. Any error-severity violation blocks issuance; there is no
//! warn-and-continue mode in this domain.

use serde::{Deserialize, Serialize};

use crate::student::Student;
use crate::templates::DocumentTemplate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<Violation>,
    pub request_type: String,
    pub template_version: String,
}

impl ValidationResult {
    pub fn success(template: &DocumentTemplate) -> Self {
        Self {
            valid: true,
            violations: vec![],
            request_type: template.request_type.to_string(),
            template_version: template.template_version.clone(),
        }
    }

    pub fn failure(template: &DocumentTemplate, violations: Vec<Violation>) -> Self {
        Self {
            valid: false,
            violations,
            request_type: template.request_type.to_string(),
            template_version: template.template_version.clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error)
    }
}

/// A single business rule checked at issuance time.
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, student: &Student, template: &DocumentTemplate) -> Vec<Violation>;
}

// --- Concrete Rules ---

/// Rejects students below the family's GPA floor.
///
/// Construction-time checks already bound the GPA to the grading scale;
/// this rule enforces the per-family minimum on top of that.
pub struct GpaFloorRule;

impl ValidationRule for GpaFloorRule {
    fn name(&self) -> &'static str {
        "gpa_floor"
    }

    fn validate(&self, student: &Student, template: &DocumentTemplate) -> Vec<Violation> {
        if template.gpa_floor.admits(student.gpa()) {
            return vec![];
        }

        vec![Violation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Error,
            message: format!("GPA below the {} minimum", template.request_type),
            expected: Some(template.gpa_floor.describe()),
            actual: Some(format!("{:.2}", student.gpa())),
            remediation: vec!["Request issuance once the GPA meets the family minimum".to_string()],
        }]
    }
}

/// Runs the rule set and folds violations into a result.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(GpaFloorRule)],
        }
    }

    pub fn validate(&self, student: &Student, template: &DocumentTemplate) -> ValidationResult {
        let mut all_violations = vec![];

        for rule in &self.rules {
            all_violations.extend(rule.validate(student, template));
        }

        let has_errors = all_violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        if has_errors {
            tracing::warn!(
                request_type = %template.request_type,
                violations = all_violations.len(),
                "validation rejected issuance"
            );
            ValidationResult::failure(template, all_violations)
        } else {
            tracing::debug!(request_type = %template.request_type, "validation passed");
            ValidationResult {
                valid: true,
                violations: all_violations,
                request_type: template.request_type.to_string(),
                template_version: template.template_version.clone(),
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
