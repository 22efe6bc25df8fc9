//! Request and service level errors

use crate::backend::BackendError;
use crate::kind::DiagnosisKind;
use thiserror::Error;

/// Errors raised while turning an input record into a verdict
#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// A categorical value has no entry in its code table. Only the strict
    /// encoding path reports this; the lenient path substitutes the sentinel.
    #[error("Unmapped category for {field}: {value:?}")]
    UnmappedCategory { field: &'static str, value: String },
    #[error("Feature vector for {kind} has length {actual}, expected {expected}")]
    VectorLengthMismatch {
        kind: DiagnosisKind,
        expected: usize,
        actual: usize,
    },
    #[error("Model for {kind} is unavailable: {reason}")]
    ModelUnavailable { kind: DiagnosisKind, reason: String },
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DiagnosisError {
    /// True when the failure belongs to the request rather than the service.
    ///
    /// Backend errors only reach callers from a classifier invocation (load
    /// failures are wrapped in `ModelUnavailable`), so they fail the request.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            DiagnosisError::UnmappedCategory { .. }
                | DiagnosisError::VectorLengthMismatch { .. }
                | DiagnosisError::Backend(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DiagnosisError>;
