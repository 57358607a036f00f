//! Registrar Core - Document Issuance Engine
//!
//! # Working Rules (Non-Negotiable)
//! 1. Templates Are Contracts
//! 2. Students Are Valid By Construction
//! 3. Validation Cannot Be Bypassed
//! 4. Dates Are Injected
//! 5. Manifests Are Fingerprinted

pub mod templates;
pub mod validation;
pub mod student;
pub mod stamp;
pub mod fingerprint;
pub mod clock;
pub mod pipeline;

pub use templates::{DocumentTemplate, GpaFloor, RequestType, TemplateRegistry};
pub use validation::{ValidationResult, ValidationRule, Violation, ViolationSeverity};
pub use student::{Student, StudentError};
pub use stamp::stamp_code;
pub use fingerprint::{canonical_json, compute_fingerprint, sha256_hex};
pub use clock::{Clock, FixedClock, SystemClock};
pub use pipeline::{Document, IssuancePipeline, IssueRequest, IssuedDocument, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
