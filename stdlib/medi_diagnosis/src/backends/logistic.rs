//! Logistic regression classifier with optional standardization
//!
//! Decision: `sigmoid(w · ((x - mean) / scale) + intercept) >= threshold`.

use crate::backend::{check_width, BackendError, BinaryClassifier, Verdict};
use serde::{Deserialize, Serialize};

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Per-feature means removed before scoring; empty means no centering.
    #[serde(default)]
    pub mean: Vec<f64>,
    /// Per-feature scales divided out before scoring; empty means unit scale.
    #[serde(default)]
    pub scale: Vec<f64>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticClassifier {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self {
            weights,
            intercept,
            mean: Vec::new(),
            scale: Vec::new(),
            threshold: default_threshold(),
        }
    }

    pub fn with_standardization(mut self, mean: Vec<f64>, scale: Vec<f64>) -> Self {
        self.mean = mean;
        self.scale = scale;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Reject parameter sets that cannot score a row.
    pub fn validate(&self) -> Result<(), BackendError> {
        let n = self.weights.len();
        if n == 0 {
            return Err(BackendError::LoadError("logistic model has no weights".into()));
        }
        if !self.mean.is_empty() && self.mean.len() != n {
            return Err(BackendError::LoadError(format!(
                "mean has {} entries, weights have {n}",
                self.mean.len()
            )));
        }
        if !self.scale.is_empty() && self.scale.len() != n {
            return Err(BackendError::LoadError(format!(
                "scale has {} entries, weights have {n}",
                self.scale.len()
            )));
        }
        if self.weights.iter().chain(&self.mean).any(|w| !w.is_finite())
            || !self.intercept.is_finite()
        {
            return Err(BackendError::LoadError(
                "weights, intercept and mean must be finite".into(),
            ));
        }
        if self.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(BackendError::LoadError("scale entries must be finite and non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(BackendError::LoadError(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Positive-class probability for one row.
    pub fn probability(&self, features: &[f64]) -> Result<f64, BackendError> {
        check_width(self.weights.len(), features)?;
        let z: f64 = features
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let centered = x - self.mean.get(i).copied().unwrap_or(0.0);
                let scaled = centered / self.scale.get(i).copied().unwrap_or(1.0);
                scaled * self.weights[i]
            })
            .sum::<f64>()
            + self.intercept;
        if !z.is_finite() {
            return Err(BackendError::InferenceError(format!("decision value {z} is not finite")));
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl BinaryClassifier for LogisticClassifier {
    fn predict(&self, features: &[f64]) -> Result<Verdict, BackendError> {
        let p = self.probability(features)?;
        Ok(if p >= self.threshold {
            Verdict::Positive
        } else {
            Verdict::Negative
        })
    }

    fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn backend_name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn probability_at_decision_boundary() {
        let model = LogisticClassifier::new(vec![1.0, -1.0], 0.0);
        let p = model.probability(&[2.0, 2.0]).unwrap();
        assert_relative_eq!(p, 0.5, epsilon = 1e-12);
        assert_eq!(model.predict(&[2.0, 2.0]).unwrap(), Verdict::Positive);
        assert_eq!(model.predict(&[0.0, 3.0]).unwrap(), Verdict::Negative);
    }

    #[test]
    fn standardization_is_applied() {
        // (x - 10) / 5 * 2 - 1 => x = 10 gives z = -1
        let model = LogisticClassifier::new(vec![2.0], -1.0)
            .with_standardization(vec![10.0], vec![5.0]);
        let p = model.probability(&[10.0]).unwrap();
        assert_relative_eq!(p, 1.0 / (1.0 + 1f64.exp()), epsilon = 1e-12);
        assert_eq!(model.predict(&[20.0]).unwrap(), Verdict::Positive);
    }

    #[test]
    fn wrong_width_is_invalid_input() {
        let model = LogisticClassifier::new(vec![0.1; 3], 0.0);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(BackendError::InvalidInput(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(LogisticClassifier::new(vec![], 0.0).validate().is_err());
        assert!(LogisticClassifier::new(vec![1.0], 0.0)
            .with_standardization(vec![0.0], vec![0.0])
            .validate()
            .is_err());
        assert!(LogisticClassifier::new(vec![1.0], 0.0)
            .with_threshold(1.5)
            .validate()
            .is_err());
        assert!(LogisticClassifier::new(vec![1.0, 2.0], 0.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_parameters() {
        assert!(LogisticClassifier::new(vec![f64::INFINITY], 0.0).validate().is_err());
        assert!(LogisticClassifier::new(vec![1.0, f64::NAN], 0.0).validate().is_err());
        assert!(LogisticClassifier::new(vec![1.0], f64::NEG_INFINITY).validate().is_err());
        assert!(LogisticClassifier::new(vec![1.0], 0.0)
            .with_standardization(vec![f64::NAN], vec![1.0])
            .validate()
            .is_err());
        assert!(LogisticClassifier::new(vec![1.0], 0.0)
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn overflowing_decision_value_is_an_inference_error() {
        // Each product overflows to an infinity of opposite sign; the sum is NaN.
        let model = LogisticClassifier::new(vec![1e308, 1e308], 0.0);
        model.validate().unwrap();
        assert!(matches!(
            model.predict(&[-2.0, 2.0]),
            Err(BackendError::InferenceError(_))
        ));
        assert!(matches!(
            model.probability(&[2.0, 2.0]),
            Err(BackendError::InferenceError(_))
        ));
    }

    #[test]
    fn threshold_defaults_when_missing_from_json() {
        let model: LogisticClassifier =
            serde_json::from_str(r#"{"weights":[0.5],"intercept":0.1}"#).unwrap();
        assert_eq!(model.threshold, 0.5);
        assert!(model.mean.is_empty());
    }
}
