//! Heart disease and diabetes risk prediction for Medi
//!
//! Turns human-readable clinical inputs into the fixed-order feature vectors
//! that two pre-trained binary classifiers expect, runs the classifiers, and
//! translates their 0/1 output into a verdict message.
//!
//! ```text
//! HeartInput / DiabetesInput
//!     -> encoding::encode_*        (FeatureVector, unmapped-category signals)
//!     -> InferenceService::predict (Verdict)
//!     -> interpret::interpret      (Interpretation { prediction, is_positive })
//! ```

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod codes;
pub mod config;
pub mod encoding;
pub mod error;
pub mod input;
pub mod interpret;
pub mod kind;
pub mod report;
pub mod service;
pub mod validate;

pub use artifact::{load_artifact, ModelArtifact};
pub use backend::{BackendError, BinaryClassifier, Verdict};
pub use backends::{LogisticClassifier, TreeEnsemble};
pub use codes::{CategoryTable, UNMAPPED_CODE};
pub use config::{CategoryPolicy, ServiceConfig};
pub use encoding::{
    encode_diabetes, encode_heart, encode_heart_checked, encode_heart_strict, EncodedHeart,
    FeatureVector, UnmappedCategory,
};
pub use error::DiagnosisError;
pub use input::{DiabetesInput, HeartInput};
pub use interpret::{interpret, interpret_with, DisplayColor, Interpretation, MessageStyle};
pub use kind::DiagnosisKind;
pub use report::DiagnosisReport;
pub use service::{Diagnosis, HealthStatus, InferenceService};
pub use validate::{validate_diabetes, validate_heart, RangeViolation};
