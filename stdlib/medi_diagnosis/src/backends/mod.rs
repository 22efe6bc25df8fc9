//! Classifier backends loadable from model artifacts

pub mod forest;
pub mod logistic;

pub use forest::{DecisionTree, TreeEnsemble, TreeNode};
pub use logistic::LogisticClassifier;
