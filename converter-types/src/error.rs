//! Error types for the conversion gateway.
//!
//! Maps cleanly to HTTP status codes. Validation failures never reach the
//! upstream provider; upstream and parse failures are resolved inside the
//! provider adapter and arrive here already mapped to a status code.

use crate::validation::FieldViolation;

/// Application-level errors (for HTTP responses).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// One or more route parameters violated a validation rule. Always a 400.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The upstream call failed; the carried status is surfaced verbatim
    /// with no payload.
    #[error("upstream failure with status {0}")]
    Upstream(u16),
}

impl From<Vec<FieldViolation>> for AppError {
    fn from(violations: Vec<FieldViolation>) -> Self {
        AppError::Validation(violations)
    }
}
