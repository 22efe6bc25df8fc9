//! Tree ensemble classifier (random-forest style soft voting)
//!
//! Each tree is stored as a flat node array with node 0 as the root. A split
//! sends a row left when `x[feature] <= threshold`. Leaves hold the fraction
//! of positive training samples; the ensemble averages those fractions and
//! predicts positive when the mean reaches 0.5.

use crate::backend::{check_width, BackendError, BinaryClassifier, Verdict};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn leaf_value(&self, features: &[f64]) -> Result<f64, BackendError> {
        let mut idx = 0;
        // A well-formed tree reaches a leaf in at most nodes.len() steps.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).ok_or_else(|| {
                        BackendError::InvalidInput(format!("tree splits on missing feature {feature}"))
                    })?;
                    idx = if *x <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => {
                    return Err(BackendError::InferenceError(format!(
                        "tree references missing node {idx}"
                    )))
                }
            }
        }
        Err(BackendError::InferenceError("tree contains a cycle".into()))
    }

    fn validate(&self, n_features: usize) -> Result<(), BackendError> {
        if self.nodes.is_empty() {
            return Err(BackendError::LoadError("tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if !threshold.is_finite() {
                        return Err(BackendError::LoadError(format!(
                            "node {i} has non-finite threshold {threshold}"
                        )));
                    }
                    if *feature >= n_features {
                        return Err(BackendError::LoadError(format!(
                            "node {i} splits on feature {feature}, model has {n_features}"
                        )));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(BackendError::LoadError(format!(
                            "node {i} points outside the tree"
                        )));
                    }
                }
                TreeNode::Leaf { value } => {
                    if !(0.0..=1.0).contains(value) {
                        return Err(BackendError::LoadError(format!(
                            "leaf {i} value {value} outside [0, 1]"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Self {
        Self { n_features, trees }
    }

    pub fn validate(&self) -> Result<(), BackendError> {
        if self.trees.is_empty() {
            return Err(BackendError::LoadError("ensemble has no trees".into()));
        }
        self.trees
            .iter()
            .try_for_each(|t| t.validate(self.n_features))
    }

    /// Mean positive-class fraction across trees.
    pub fn probability(&self, features: &[f64]) -> Result<f64, BackendError> {
        check_width(self.n_features, features)?;
        if self.trees.is_empty() {
            return Err(BackendError::InferenceError("ensemble has no trees".into()));
        }
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.leaf_value(features)?;
        }
        let mean = total / self.trees.len() as f64;
        if !mean.is_finite() {
            return Err(BackendError::InferenceError(format!("ensemble score {mean} is not finite")));
        }
        Ok(mean)
    }
}

impl BinaryClassifier for TreeEnsemble {
    fn predict(&self, features: &[f64]) -> Result<Verdict, BackendError> {
        let p = self.probability(features)?;
        Ok(if p >= 0.5 {
            Verdict::Positive
        } else {
            Verdict::Negative
        })
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn backend_name(&self) -> &str {
        "tree_ensemble"
    }
}
