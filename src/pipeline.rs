//! Issuance Pipeline - Single Entry Point
//!
//! `issue` runs validation internally before anything is rendered. There
//! is no path to a stamped document that skips the rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::fingerprint::compute_fingerprint;
use crate::stamp::stamp_code;
use crate::student::Student;
use crate::templates::{DocumentTemplate, RequestType, TemplateRegistry};
use crate::validation::{ValidationResult, Validator};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unsupported request type: {0}")]
    UnsupportedRequest(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Family version {0} requires engine >= {1}, current is {2}")]
    EngineVersionMismatch(String, String, String),

    #[error("Issuance error: {0}")]
    IssuanceError(String),

    #[error("Document assembly failed: {0}")]
    Assembly(#[from] DocumentError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document body must not be empty")]
    EmptyBody,

    #[error("Document stamp must not be empty")]
    EmptyStamp,
}

/// An issuance request: which family, for which student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub request_type: RequestType,
    pub student: Student,
}

/// The issued document proper: a rendered body and its stamp code. Both
/// are non-empty, enforced at assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    body: String,
    stamp: String,
}

impl Document {
    pub fn new(body: String, stamp: String) -> Result<Self, DocumentError> {
        if body.trim().is_empty() {
            return Err(DocumentError::EmptyBody);
        }
        if stamp.trim().is_empty() {
            return Err(DocumentError::EmptyStamp);
        }
        Ok(Self { body, stamp })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }
}

/// Full issuance manifest: the document plus everything needed to audit
/// or reproduce it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedDocument {
    pub id: String,
    pub request_type: RequestType,
    pub template_version: String,
    pub engine_version: String,
    pub issued_on: NaiveDate,
    pub document: Document,
    pub validation: ValidationResult,
    pub fingerprint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintInput<'a> {
    request_type: RequestType,
    template_version: &'a str,
    engine_version: &'a str,
    issued_on: NaiveDate,
    body: &'a str,
    stamp: &'a str,
}

/// The issuance pipeline - single entry point for all document requests.
pub struct IssuancePipeline {
    registry: TemplateRegistry,
    validator: Validator,
    clock: Box<dyn Clock>,
}

impl IssuancePipeline {
    /// Pipeline on the host clock.
    pub fn new(registry: TemplateRegistry) -> Self {
        Self::with_clock(registry, Box::new(SystemClock))
    }

    /// Pipeline with an injected time source.
    pub fn with_clock(registry: TemplateRegistry, clock: Box<dyn Clock>) -> Self {
        Self {
            registry,
            validator: Validator::new(),
            clock,
        }
    }

    /// List the registered document families.
    pub fn list_families(&self) -> Vec<&DocumentTemplate> {
        self.registry.list()
    }

    /// Get a specific family.
    pub fn get_family(&self, request_type: RequestType) -> Option<&DocumentTemplate> {
        self.registry.get(request_type)
    }

    /// Validate a student against a family's rules.
    ///
    /// This is the ONLY validation entry point.
    pub fn validate_student(
        &self,
        request_type: RequestType,
        student: &Student,
    ) -> Result<ValidationResult, PipelineError> {
        let template = self.family(request_type)?;
        self.check_engine_version(template)?;
        Ok(self.validator.validate(student, template))
    }

    /// Issue a document.
    ///
    /// Always validates internally; on failure no partial document exists.
    pub fn issue(&self, request: &IssueRequest) -> Result<IssuedDocument, PipelineError> {
        let template = self.family(request.request_type)?;
        tracing::debug!(request_type = %request.request_type, "family selected");

        let validation = self.validate_student(request.request_type, &request.student)?;
        if !validation.valid {
            let messages: Vec<_> = validation
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.rule, v.message))
                .collect();
            return Err(PipelineError::ValidationFailed(messages.join("; ")));
        }

        // One clock read per issuance: body date and stamp day-of-year
        // always agree.
        let issued_on = self.clock.today();
        let body = template.render(&request.student, issued_on);
        let stamp = stamp_code(&template.stamp_prefix, request.student.id(), issued_on);
        let document = Document::new(body, stamp)?;

        // Fingerprint covers the reproducible core only, not the issuance
        // uuid: identical inputs on the same date fingerprint identically.
        let fingerprint = compute_fingerprint(&FingerprintInput {
            request_type: request.request_type,
            template_version: &template.template_version,
            engine_version: ENGINE_VERSION,
            issued_on,
            body: document.body(),
            stamp: document.stamp(),
        })?;

        let issued = IssuedDocument {
            id: Uuid::new_v4().to_string(),
            request_type: request.request_type,
            template_version: template.template_version.clone(),
            engine_version: ENGINE_VERSION.to_string(),
            issued_on,
            document,
            validation,
            fingerprint,
        };

        tracing::debug!(
            request_type = %issued.request_type,
            stamp = issued.document.stamp(),
            "document issued"
        );
        Ok(issued)
    }

    fn family(&self, request_type: RequestType) -> Result<&DocumentTemplate, PipelineError> {
        // The enum is closed, so this miss only fires on a misconfigured
        // registry.
        self.registry
            .get(request_type)
            .ok_or_else(|| PipelineError::UnsupportedRequest(request_type.to_string()))
    }

    fn check_engine_version(&self, template: &DocumentTemplate) -> Result<(), PipelineError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| PipelineError::IssuanceError("Invalid engine version".into()))?;
        let min_ver = semver::Version::parse(&template.engine_min_version)
            .map_err(|_| PipelineError::IssuanceError("Invalid family min version".into()))?;

        if engine_ver < min_ver {
            return Err(PipelineError::EngineVersionMismatch(
                template.template_version.clone(),
                template.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for IssuancePipeline {
    fn default() -> Self {
        Self::new(TemplateRegistry::default())
    }
}
