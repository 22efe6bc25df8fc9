//! Input record to feature vector encoding
//!
//! # Heart feature layout (13 dimensions)
//!
//! | Index | Feature                  | Source                           |
//! |-------|--------------------------|----------------------------------|
//! | 0     | age                      | numeric                          |
//! | 1     | sex                      | [`codes::SEX`]                   |
//! | 2     | chest_pain_type          | [`codes::CHEST_PAIN_TYPE`]       |
//! | 3     | resting_bp               | numeric                          |
//! | 4     | serum_cholesterol        | numeric                          |
//! | 5     | fasting_blood_sugar_high | [`codes::FASTING_BLOOD_SUGAR_HIGH`] |
//! | 6     | resting_ecg              | [`codes::RESTING_ECG`]           |
//! | 7     | max_heart_rate           | numeric                          |
//! | 8     | exercise_angina          | [`codes::EXERCISE_ANGINA`]       |
//! | 9     | st_depression            | numeric                          |
//! | 10    | st_slope                 | [`codes::ST_SLOPE`]              |
//! | 11    | num_major_vessels        | numeric                          |
//! | 12    | thalassemia              | [`codes::THALASSEMIA`]           |
//!
//! The diabetes layout is the eight input fields in declaration order.

use crate::codes::{self, CategoryTable, UNMAPPED_CODE};
use crate::error::DiagnosisError;
use crate::input::{DiabetesInput, HeartInput};
use crate::kind::DiagnosisKind;
use serde::{Deserialize, Serialize};

/// Ordered numeric features for one classifier call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Named view of the vector for a kind, e.g. for debug output.
    pub fn named(&self, kind: DiagnosisKind) -> Vec<(&'static str, f64)> {
        kind.feature_names()
            .iter()
            .copied()
            .zip(self.0.iter().copied())
            .collect()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// A categorical value that matched nothing in its table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmappedCategory {
    pub field: &'static str,
    pub value: String,
}

impl From<UnmappedCategory> for DiagnosisError {
    fn from(u: UnmappedCategory) -> Self {
        DiagnosisError::UnmappedCategory {
            field: u.field,
            value: u.value,
        }
    }
}

/// Heart encoding together with the categories that fell back to the sentinel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedHeart {
    pub vector: FeatureVector,
    pub unmapped: Vec<UnmappedCategory>,
}

impl EncodedHeart {
    pub fn is_fully_mapped(&self) -> bool {
        self.unmapped.is_empty()
    }
}

/// Encode a heart record. Never fails: unknown categories become `-1`.
pub fn encode_heart(input: &HeartInput) -> FeatureVector {
    encode_heart_checked(input).vector
}

/// Encode a heart record and report every categorical miss.
pub fn encode_heart_checked(input: &HeartInput) -> EncodedHeart {
    let mut unmapped = Vec::new();
    let mut code = |table: &CategoryTable, value: &str| -> f64 {
        let c = table.encode(value);
        if c == UNMAPPED_CODE {
            log::warn!("unmapped {} value {:?}; encoding as {}", table.field, value, UNMAPPED_CODE);
            unmapped.push(UnmappedCategory {
                field: table.field,
                value: value.to_string(),
            });
        }
        f64::from(c)
    };

    let values = vec![
        f64::from(input.age),
        code(&codes::SEX, &input.sex),
        code(&codes::CHEST_PAIN_TYPE, &input.chest_pain_type),
        f64::from(input.resting_bp),
        f64::from(input.serum_cholesterol),
        code(
            &codes::FASTING_BLOOD_SUGAR_HIGH,
            &input.fasting_blood_sugar_high,
        ),
        code(&codes::RESTING_ECG, &input.resting_ecg),
        f64::from(input.max_heart_rate),
        code(&codes::EXERCISE_ANGINA, &input.exercise_angina),
        input.st_depression,
        code(&codes::ST_SLOPE, &input.st_slope),
        f64::from(input.num_major_vessels),
        code(&codes::THALASSEMIA, &input.thalassemia),
    ];
    debug_assert_eq!(values.len(), DiagnosisKind::Heart.feature_count());
    log::debug!("encoded heart input: {values:?}");

    EncodedHeart {
        vector: FeatureVector(values),
        unmapped,
    }
}

/// Encode a heart record, failing on the first unmapped category.
pub fn encode_heart_strict(input: &HeartInput) -> Result<FeatureVector, DiagnosisError> {
    let encoded = encode_heart_checked(input);
    match encoded.unmapped.into_iter().next() {
        Some(miss) => Err(miss.into()),
        None => Ok(encoded.vector),
    }
}

/// Encode a diabetes record: the eight fields, unchanged, in order.
pub fn encode_diabetes(input: &DiabetesInput) -> FeatureVector {
    let values = vec![
        f64::from(input.pregnancies),
        f64::from(input.glucose),
        f64::from(input.blood_pressure),
        f64::from(input.skin_thickness),
        f64::from(input.insulin),
        input.bmi,
        input.diabetes_pedigree_function,
        f64::from(input.age),
    ];
    log::debug!("encoded diabetes input: {values:?}");
    FeatureVector(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart() -> HeartInput {
        HeartInput {
            age: 63,
            sex: "Female".into(),
            chest_pain_type: "Typical Angina".into(),
            resting_bp: 145,
            serum_cholesterol: 233,
            fasting_blood_sugar_high: "no".into(),
            resting_ecg: "ST-T Wave Abnormality".into(),
            max_heart_rate: 150,
            exercise_angina: "YES".into(),
            st_depression: 2.3,
            st_slope: "Downsloping".into(),
            num_major_vessels: 0,
            thalassemia: "Reversible Defect".into(),
        }
    }

    #[test]
    fn encodes_in_feature_order() {
        let v = encode_heart(&heart());
        assert_eq!(
            v.as_slice(),
            &[63.0, 0.0, 0.0, 145.0, 233.0, 0.0, 1.0, 150.0, 1.0, 2.3, 2.0, 0.0, 2.0]
        );
    }

    #[test]
    fn checked_encoding_lists_each_miss() {
        let mut input = heart();
        input.resting_ecg = "Abnormal".into();
        input.sex = "other".into();
        let encoded = encode_heart_checked(&input);
        assert!(!encoded.is_fully_mapped());
        let fields: Vec<_> = encoded.unmapped.iter().map(|u| u.field).collect();
        assert_eq!(fields, vec!["sex", "resting_ecg"]);
        assert_eq!(encoded.vector.as_slice()[1], -1.0);
        assert_eq!(encoded.vector.as_slice()[6], -1.0);
    }

    #[test]
    fn strict_encoding_rejects_unmapped() {
        let mut input = heart();
        input.thalassemia = "normal".into();
        match encode_heart_strict(&input) {
            Err(DiagnosisError::UnmappedCategory { field, value }) => {
                assert_eq!(field, "thalassemia");
                assert_eq!(value, "normal");
            }
            other => panic!("expected UnmappedCategory, got {other:?}"),
        }
        assert!(encode_heart_strict(&heart()).is_ok());
    }

    #[test]
    fn named_view_pairs_features_with_values() {
        let v = encode_heart(&heart());
        let named = v.named(DiagnosisKind::Heart);
        assert_eq!(named[0], ("age", 63.0));
        assert_eq!(named[12], ("thalassemia", 2.0));
    }
}
