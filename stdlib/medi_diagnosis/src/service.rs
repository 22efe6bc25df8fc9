//! Inference service: one loaded classifier per diagnosis kind
//!
//! Models are registered once, checked against the width of their kind, and
//! then frozen. The service is `Send + Sync` and holds no mutable state, so a
//! single instance can be shared across request handlers.

use crate::artifact::load_artifact;
use crate::backend::{BinaryClassifier, Verdict};
use crate::config::{CategoryPolicy, ServiceConfig};
use crate::encoding::{encode_diabetes, encode_heart_checked, FeatureVector, UnmappedCategory};
use crate::error::{DiagnosisError, Result};
use crate::input::{DiabetesInput, HeartInput};
use crate::interpret::{interpret_with, Interpretation, MessageStyle};
use crate::kind::DiagnosisKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const HEALTHY_STATUS: &str = "API is running successfully";

/// Outcome of a full encode → predict → interpret pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub kind: DiagnosisKind,
    pub features: FeatureVector,
    pub verdict: Verdict,
    pub interpretation: Interpretation,
    /// Heart categories that were encoded as the sentinel.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped: Vec<UnmappedCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelStatus {
    pub kind: DiagnosisKind,
    pub backend: String,
    pub n_features: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub models: Vec<ModelStatus>,
}

#[derive(Default)]
pub struct InferenceServiceBuilder {
    models: BTreeMap<DiagnosisKind, Arc<dyn BinaryClassifier>>,
    category_policy: CategoryPolicy,
    message_style: MessageStyle,
}

impl InferenceServiceBuilder {
    pub fn with_model(mut self, kind: DiagnosisKind, model: Arc<dyn BinaryClassifier>) -> Self {
        self.models.insert(kind, model);
        self
    }

    pub fn category_policy(mut self, policy: CategoryPolicy) -> Self {
        self.category_policy = policy;
        self
    }

    pub fn message_style(mut self, style: MessageStyle) -> Self {
        self.message_style = style;
        self
    }

    /// Freeze the registered models. Fails if a model's width does not match
    /// the width of the kind it was registered for.
    pub fn build(self) -> Result<InferenceService> {
        for (kind, model) in &self.models {
            if model.n_features() != kind.feature_count() {
                return Err(DiagnosisError::ModelUnavailable {
                    kind: *kind,
                    reason: format!(
                        "{} model expects {} features, {kind} inputs have {}",
                        model.backend_name(),
                        model.n_features(),
                        kind.feature_count()
                    ),
                });
            }
        }
        Ok(InferenceService {
            models: Arc::new(self.models),
            category_policy: self.category_policy,
            message_style: self.message_style,
        })
    }
}

#[derive(Clone)]
pub struct InferenceService {
    models: Arc<BTreeMap<DiagnosisKind, Arc<dyn BinaryClassifier>>>,
    category_policy: CategoryPolicy,
    message_style: MessageStyle,
}

impl std::fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let models: Vec<_> = self
            .models
            .iter()
            .map(|(k, m)| (k, m.backend_name()))
            .collect();
        f.debug_struct("InferenceService")
            .field("models", &models)
            .field("category_policy", &self.category_policy)
            .field("message_style", &self.message_style)
            .finish()
    }
}

impl InferenceService {
    pub fn builder() -> InferenceServiceBuilder {
        InferenceServiceBuilder::default()
    }

    /// Load both model artifacts named by the config. Any failure is fatal.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .category_policy(config.category_policy)
            .message_style(config.message_style);
        for kind in DiagnosisKind::ALL {
            let path = config.model_path(kind);
            let model = load_artifact(path).map_err(|e| DiagnosisError::ModelUnavailable {
                kind,
                reason: e.to_string(),
            })?;
            builder = builder.with_model(kind, model);
        }
        builder.build()
    }

    pub fn category_policy(&self) -> CategoryPolicy {
        self.category_policy
    }

    pub fn message_style(&self) -> MessageStyle {
        self.message_style
    }

    fn model(&self, kind: DiagnosisKind) -> Result<&Arc<dyn BinaryClassifier>> {
        self.models
            .get(&kind)
            .ok_or_else(|| DiagnosisError::ModelUnavailable {
                kind,
                reason: "no model registered".into(),
            })
    }

    /// Score one encoded vector.
    pub fn predict(&self, kind: DiagnosisKind, features: &FeatureVector) -> Result<Verdict> {
        let expected = kind.feature_count();
        if features.len() != expected {
            return Err(DiagnosisError::VectorLengthMismatch {
                kind,
                expected,
                actual: features.len(),
            });
        }
        let verdict = self.model(kind)?.predict(features.as_slice())?;
        log::debug!("{kind} prediction: {}", verdict.as_bit());
        Ok(verdict)
    }

    pub fn predict_batch(
        &self,
        kind: DiagnosisKind,
        rows: &[FeatureVector],
    ) -> Result<Vec<Verdict>> {
        rows.iter().map(|row| self.predict(kind, row)).collect()
    }

    pub fn interpret(&self, kind: DiagnosisKind, verdict: Verdict) -> Interpretation {
        interpret_with(kind, verdict, self.message_style)
    }

    pub fn diagnose_heart(&self, input: &HeartInput) -> Result<Diagnosis> {
        let encoded = encode_heart_checked(input);
        if self.category_policy == CategoryPolicy::Strict {
            if let Some(miss) = encoded.unmapped.first() {
                return Err(miss.clone().into());
            }
        }
        let verdict = self.predict(DiagnosisKind::Heart, &encoded.vector)?;
        Ok(Diagnosis {
            kind: DiagnosisKind::Heart,
            features: encoded.vector,
            verdict,
            interpretation: self.interpret(DiagnosisKind::Heart, verdict),
            unmapped: encoded.unmapped,
        })
    }

    pub fn diagnose_diabetes(&self, input: &DiabetesInput) -> Result<Diagnosis> {
        let features = encode_diabetes(input);
        let verdict = self.predict(DiagnosisKind::Diabetes, &features)?;
        Ok(Diagnosis {
            kind: DiagnosisKind::Diabetes,
            features,
            verdict,
            interpretation: self.interpret(DiagnosisKind::Diabetes, verdict),
            unmapped: Vec::new(),
        })
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: HEALTHY_STATUS.to_string(),
            models: self
                .models
                .iter()
                .map(|(kind, m)| ModelStatus {
                    kind: *kind,
                    backend: m.backend_name().to_string(),
                    n_features: m.n_features(),
                })
                .collect(),
        }
    }
}
