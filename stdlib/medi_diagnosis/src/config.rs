//! Service configuration
//!
//! Resolution order: built-in defaults, then an optional JSON file, then the
//! `MEDI_*` environment variables, then whatever the caller sets explicitly
//! (the CLI applies its flags last).

use crate::error::DiagnosisError;
use crate::interpret::MessageStyle;
use crate::kind::DiagnosisKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_HEART_MODEL: &str = "MEDI_HEART_MODEL";
pub const ENV_DIABETES_MODEL: &str = "MEDI_DIABETES_MODEL";
pub const ENV_STRICT_CATEGORIES: &str = "MEDI_STRICT_CATEGORIES";
pub const ENV_MESSAGE_STYLE: &str = "MEDI_MESSAGE_STYLE";

/// What to do with a categorical value that has no code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Encode the sentinel `-1` and carry on.
    #[default]
    Lenient,
    /// Fail the request with `UnmappedCategory`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub heart_model: PathBuf,
    pub diabetes_model: PathBuf,
    pub category_policy: CategoryPolicy,
    pub message_style: MessageStyle,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            heart_model: PathBuf::from("heart.json"),
            diabetes_model: PathBuf::from("diabetes.json"),
            category_policy: CategoryPolicy::Lenient,
            message_style: MessageStyle::Headline,
        }
    }
}

impl ServiceConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DiagnosisError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            DiagnosisError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&s).map_err(|e| {
            DiagnosisError::Config(format!("invalid config '{}': {e}", path.display()))
        })
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) -> Result<(), DiagnosisError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable source.
    pub fn apply_vars<F>(&mut self, get: F) -> Result<(), DiagnosisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = get(ENV_HEART_MODEL) {
            self.heart_model = PathBuf::from(p);
        }
        if let Some(p) = get(ENV_DIABETES_MODEL) {
            self.diabetes_model = PathBuf::from(p);
        }
        if let Some(s) = get(ENV_STRICT_CATEGORIES) {
            self.category_policy = match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => CategoryPolicy::Strict,
                "0" | "false" | "no" | "off" | "" => CategoryPolicy::Lenient,
                other => {
                    return Err(DiagnosisError::Config(format!(
                        "{ENV_STRICT_CATEGORIES}: expected a boolean, got {other:?}"
                    )))
                }
            };
        }
        if let Some(s) = get(ENV_MESSAGE_STYLE) {
            self.message_style = s
                .parse()
                .map_err(|e| DiagnosisError::Config(format!("{ENV_MESSAGE_STYLE}: {e}")))?;
        }
        Ok(())
    }

    pub fn model_path(&self, kind: DiagnosisKind) -> &Path {
        match kind {
            DiagnosisKind::Heart => &self.heart_model,
            DiagnosisKind::Diabetes => &self.diabetes_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let c = ServiceConfig::default();
        assert_eq!(c.model_path(DiagnosisKind::Heart), Path::new("heart.json"));
        assert_eq!(c.category_policy, CategoryPolicy::Lenient);
        assert_eq!(c.message_style, MessageStyle::Headline);
    }

    #[test]
    fn vars_override_defaults() {
        let vars: HashMap<&str, &str> = [
            (ENV_HEART_MODEL, "/models/h.json"),
            (ENV_STRICT_CATEGORIES, "TRUE"),
            (ENV_MESSAGE_STYLE, "sentence"),
        ]
        .into_iter()
        .collect();
        let mut c = ServiceConfig::default();
        c.apply_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(c.heart_model, PathBuf::from("/models/h.json"));
        assert_eq!(c.diabetes_model, PathBuf::from("diabetes.json"));
        assert_eq!(c.category_policy, CategoryPolicy::Strict);
        assert_eq!(c.message_style, MessageStyle::Sentence);
    }

    #[test]
    fn bad_boolean_is_config_error() {
        let mut c = ServiceConfig::default();
        let err = c
            .apply_vars(|k| (k == ENV_STRICT_CATEGORIES).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, DiagnosisError::Config(_)));
    }

    #[test]
    fn partial_json_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medi.json");
        std::fs::write(&path, r#"{"diabetes_model":"d.json","category_policy":"strict"}"#)
            .unwrap();
        let c = ServiceConfig::from_json_file(&path).unwrap();
        assert_eq!(c.heart_model, PathBuf::from("heart.json"));
        assert_eq!(c.diabetes_model, PathBuf::from("d.json"));
        assert_eq!(c.category_policy, CategoryPolicy::Strict);
    }
}
