//! Diagnosis types served by the crate and their feature layouts

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column order the heart model was fit on.
pub const HEART_FEATURES: [&str; 13] = [
    "age",
    "sex",
    "chest_pain_type",
    "resting_bp",
    "serum_cholesterol",
    "fasting_blood_sugar_high",
    "resting_ecg",
    "max_heart_rate",
    "exercise_angina",
    "st_depression",
    "st_slope",
    "num_major_vessels",
    "thalassemia",
];

/// Column order the diabetes model was fit on.
pub const DIABETES_FEATURES: [&str; 8] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree_function",
    "age",
];

/// Which classifier a request is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisKind {
    Heart,
    Diabetes,
}

impl DiagnosisKind {
    pub const ALL: [DiagnosisKind; 2] = [DiagnosisKind::Heart, DiagnosisKind::Diabetes];

    /// Width of the feature vector the model expects.
    pub fn feature_count(self) -> usize {
        self.feature_names().len()
    }

    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            DiagnosisKind::Heart => &HEART_FEATURES,
            DiagnosisKind::Diabetes => &DIABETES_FEATURES,
        }
    }

    /// Human-facing test name, as shown on reports.
    pub fn title(self) -> &'static str {
        match self {
            DiagnosisKind::Heart => "Heart Disease",
            DiagnosisKind::Diabetes => "Diabetes",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosisKind::Heart => "heart",
            DiagnosisKind::Diabetes => "diabetes",
        }
    }
}

impl std::fmt::Display for DiagnosisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heart" | "heart disease" | "heart_disease" => Ok(DiagnosisKind::Heart),
            "diabetes" => Ok(DiagnosisKind::Diabetes),
            other => Err(format!("unknown diagnosis type: {other}")),
        }
    }
}
