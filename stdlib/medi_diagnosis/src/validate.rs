//! Range checks for input records, matching the entry form's limits.
//!
//! The encoder does not call these; callers validate before encoding.

use crate::input::{DiabetesInput, HeartInput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl std::fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}

/// Inclusive bounds for one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    fn check(&self, value: f64, out: &mut Vec<RangeViolation>) {
        if !(self.min..=self.max).contains(&value) {
            out.push(RangeViolation {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
    }
}

pub const HEART_RANGES: [FieldRange; 6] = [
    FieldRange::new("age", 0.0, 120.0),
    FieldRange::new("resting_bp", 50.0, 200.0),
    FieldRange::new("serum_cholesterol", 100.0, 600.0),
    FieldRange::new("max_heart_rate", 60.0, 220.0),
    FieldRange::new("st_depression", 0.0, 10.0),
    FieldRange::new("num_major_vessels", 0.0, 3.0),
];

pub const DIABETES_RANGES: [FieldRange; 8] = [
    FieldRange::new("pregnancies", 0.0, 20.0),
    FieldRange::new("glucose", 0.0, 300.0),
    FieldRange::new("blood_pressure", 0.0, 200.0),
    FieldRange::new("skin_thickness", 0.0, 100.0),
    FieldRange::new("insulin", 0.0, 900.0),
    FieldRange::new("bmi", 0.0, 60.0),
    FieldRange::new("diabetes_pedigree_function", 0.0, 2.5),
    FieldRange::new("age", 0.0, 120.0),
];

/// Check every ranged heart field; returns all violations, not just the first.
pub fn validate_heart(input: &HeartInput) -> Result<(), Vec<RangeViolation>> {
    let values = [
        f64::from(input.age),
        f64::from(input.resting_bp),
        f64::from(input.serum_cholesterol),
        f64::from(input.max_heart_rate),
        input.st_depression,
        f64::from(input.num_major_vessels),
    ];
    collect(&HEART_RANGES, &values)
}

pub fn validate_diabetes(input: &DiabetesInput) -> Result<(), Vec<RangeViolation>> {
    let values = [
        f64::from(input.pregnancies),
        f64::from(input.glucose),
        f64::from(input.blood_pressure),
        f64::from(input.skin_thickness),
        f64::from(input.insulin),
        input.bmi,
        input.diabetes_pedigree_function,
        f64::from(input.age),
    ];
    collect(&DIABETES_RANGES, &values)
}

fn collect(ranges: &[FieldRange], values: &[f64]) -> Result<(), Vec<RangeViolation>> {
    let mut out = Vec::new();
    for (range, value) in ranges.iter().zip(values) {
        range.check(*value, &mut out);
    }
    if out.is_empty() {
        Ok(())
    } else {
        Err(out)
    }
}
