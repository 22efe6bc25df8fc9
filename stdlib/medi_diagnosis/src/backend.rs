//! Classifier trait and error types for model inference

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur inside a classifier backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Model loading failed: {0}")]
    LoadError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Inference failed: {0}")]
    InferenceError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),
}

/// Binary classifier output before it is turned into a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Verdict {
    Negative,
    Positive,
}

impl Verdict {
    pub fn from_bit(bit: u8) -> Result<Self, BackendError> {
        match bit {
            0 => Ok(Verdict::Negative),
            1 => Ok(Verdict::Positive),
            other => Err(BackendError::InferenceError(format!(
                "classifier returned {other}, expected 0 or 1"
            ))),
        }
    }

    pub fn as_bit(self) -> u8 {
        match self {
            Verdict::Negative => 0,
            Verdict::Positive => 1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Verdict::Positive
    }
}

impl From<Verdict> for u8 {
    fn from(v: Verdict) -> Self {
        v.as_bit()
    }
}

impl TryFrom<u8> for Verdict {
    type Error = BackendError;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        Verdict::from_bit(bit)
    }
}

/// A loaded, read-only binary classifier.
///
/// Implementations must be deterministic for a fixed input and safe to call
/// from many threads at once; the service never mutates a model after load.
pub trait BinaryClassifier: Send + Sync {
    /// Score one feature row and return its class.
    fn predict(&self, features: &[f64]) -> Result<Verdict, BackendError>;

    /// Number of input columns the model was fit on.
    fn n_features(&self) -> usize;

    /// Backend name/identifier
    fn backend_name(&self) -> &str;
}

impl std::fmt::Debug for dyn BinaryClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryClassifier")
            .field("backend", &self.backend_name())
            .field("n_features", &self.n_features())
            .finish()
    }
}

/// Shared check used by backends before scoring a row.
pub(crate) fn check_width(expected: usize, features: &[f64]) -> Result<(), BackendError> {
    if features.len() != expected {
        return Err(BackendError::InvalidInput(format!(
            "expected {expected} features, got {}",
            features.len()
        )));
    }
    if let Some(i) = features.iter().position(|x| x.is_nan()) {
        return Err(BackendError::InvalidInput(format!("feature {i} is NaN")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_bits() {
        assert_eq!(Verdict::from_bit(0).unwrap(), Verdict::Negative);
        assert_eq!(Verdict::from_bit(1).unwrap(), Verdict::Positive);
        assert!(matches!(
            Verdict::from_bit(2),
            Err(BackendError::InferenceError(_))
        ));
        assert_eq!(Verdict::Positive.as_bit(), 1);
    }

    #[test]
    fn verdict_serializes_as_bit() {
        assert_eq!(serde_json::to_string(&Verdict::Positive).unwrap(), "1");
        let v: Verdict = serde_json::from_str("0").unwrap();
        assert_eq!(v, Verdict::Negative);
        assert!(serde_json::from_str::<Verdict>("7").is_err());
    }

    struct Constant;

    impl BinaryClassifier for Constant {
        fn predict(&self, _features: &[f64]) -> Result<Verdict, BackendError> {
            Ok(Verdict::Negative)
        }

        fn n_features(&self) -> usize {
            4
        }

        fn backend_name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn trait_objects_are_debug() {
        let model: std::sync::Arc<dyn BinaryClassifier> = std::sync::Arc::new(Constant);
        assert_eq!(
            format!("{model:?}"),
            r#"BinaryClassifier { backend: "constant", n_features: 4 }"#
        );
    }

    #[test]
    fn width_check() {
        assert!(check_width(2, &[1.0, 2.0]).is_ok());
        assert!(matches!(
            check_width(3, &[1.0, 2.0]),
            Err(BackendError::InvalidInput(_))
        ));
        assert!(check_width(1, &[f64::NAN]).is_err());
    }
}
