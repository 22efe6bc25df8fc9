//! JSON model artifacts
//!
//! An artifact is a single JSON document tagged with its backend kind:
//!
//! ```json
//! { "kind": "logistic", "weights": [...], "intercept": -3.2 }
//! { "kind": "tree_ensemble", "n_features": 8, "trees": [...] }
//! ```

use crate::backend::{BackendError, BinaryClassifier};
use crate::backends::{LogisticClassifier, TreeEnsemble};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticClassifier),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn from_json(s: &str) -> Result<Self, BackendError> {
        let artifact: ModelArtifact = serde_json::from_str(s)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        match self {
            ModelArtifact::Logistic(m) => m.validate(),
            ModelArtifact::TreeEnsemble(m) => m.validate(),
        }
    }

    /// Turn the artifact into a shareable classifier handle.
    pub fn into_classifier(self) -> Arc<dyn BinaryClassifier> {
        match self {
            ModelArtifact::Logistic(m) => Arc::new(m),
            ModelArtifact::TreeEnsemble(m) => Arc::new(m),
        }
    }
}

/// Read and validate an artifact file.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<Arc<dyn BinaryClassifier>, BackendError> {
    let path = path.as_ref();
    let s = read_to_string(path).map_err(|e| {
        BackendError::LoadError(format!("failed to read '{}': {e}", path.display()))
    })?;
    let model = ModelArtifact::from_json(&s)?.into_classifier();
    log::info!(
        "loaded {} model with {} features from {}",
        model.backend_name(),
        model.n_features(),
        path.display()
    );
    Ok(model)
}
