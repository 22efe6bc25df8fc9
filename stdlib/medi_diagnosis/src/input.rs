//! Raw input records accepted by the encoders

use serde::{Deserialize, Serialize};

/// Heart disease record as entered by a clinician or API caller.
///
/// Categorical fields stay as strings so that an unrecognized value reaches
/// the encoder instead of being rejected during deserialization. The serde
/// aliases accept the short field names used by the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartInput {
    pub age: u32,
    pub sex: String,
    #[serde(alias = "chest_pain")]
    pub chest_pain_type: String,
    pub resting_bp: u32,
    #[serde(alias = "serum_chol")]
    pub serum_cholesterol: u32,
    #[serde(alias = "fasting_bs")]
    pub fasting_blood_sugar_high: String,
    pub resting_ecg: String,
    #[serde(alias = "max_hr")]
    pub max_heart_rate: u32,
    pub exercise_angina: String,
    pub st_depression: f64,
    pub st_slope: String,
    #[serde(alias = "ca")]
    pub num_major_vessels: u8,
    #[serde(alias = "thal")]
    pub thalassemia: String,
}

impl HeartInput {
    /// Rows for display, labelled the way the entry form labels them.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Age", self.age.to_string()),
            ("Sex", self.sex.clone()),
            ("Chest Pain Type", self.chest_pain_type.clone()),
            ("Resting BP", self.resting_bp.to_string()),
            ("Serum Cholesterol", self.serum_cholesterol.to_string()),
            (
                "Fasting BS > 120 mg/dL",
                self.fasting_blood_sugar_high.clone(),
            ),
            ("Resting ECG", self.resting_ecg.clone()),
            ("Max HR", self.max_heart_rate.to_string()),
            ("Exercise Angina", self.exercise_angina.clone()),
            ("ST Depression", self.st_depression.to_string()),
            ("ST Slope", self.st_slope.clone()),
            ("Number of Vessels", self.num_major_vessels.to_string()),
            ("Thalassemia", self.thalassemia.clone()),
        ]
    }
}

/// Diabetes record; every field is already numeric and model-ready.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiabetesInput {
    pub pregnancies: u32,
    pub glucose: u32,
    pub blood_pressure: u32,
    pub skin_thickness: u32,
    pub insulin: u32,
    pub bmi: f64,
    #[serde(alias = "diabetes_pedigree")]
    pub diabetes_pedigree_function: f64,
    pub age: u32,
}

impl DiabetesInput {
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Pregnancies", self.pregnancies.to_string()),
            ("Glucose Level", self.glucose.to_string()),
            ("Blood Pressure", self.blood_pressure.to_string()),
            ("Skin Thickness", self.skin_thickness.to_string()),
            ("Insulin", self.insulin.to_string()),
            ("BMI", self.bmi.to_string()),
            (
                "Diabetes Pedigree Function",
                self.diabetes_pedigree_function.to_string(),
            ),
            ("Age", self.age.to_string()),
        ]
    }
}
