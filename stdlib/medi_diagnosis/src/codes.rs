//! Categorical code tables for the heart model
//!
//! Each table maps the human-readable value of one categorical field to the
//! integer code the classifier was trained with. The tables are plain data so
//! the encoder and the report decoder read from the same source.

use serde::Serialize;

/// Code written into the feature vector when a value matches no table entry.
pub const UNMAPPED_CODE: i32 = -1;

/// How input strings are compared against table labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Matching {
    /// Byte-for-byte match against the label.
    Exact,
    /// ASCII case-insensitive match, used for the yes/no style fields.
    CaseInsensitive,
}

/// Fixed label-to-code mapping for one categorical field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    pub field: &'static str,
    pub entries: &'static [(&'static str, i32)],
    pub matching: Matching,
}

impl CategoryTable {
    /// Look up the code for `value`, or `None` when the value is not listed.
    pub fn code_of(&self, value: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(label, _)| match self.matching {
                Matching::Exact => *label == value,
                Matching::CaseInsensitive => label.eq_ignore_ascii_case(value),
            })
            .map(|(_, code)| *code)
    }

    /// Look up the code for `value`, falling back to [`UNMAPPED_CODE`].
    pub fn encode(&self, value: &str) -> i32 {
        self.code_of(value).unwrap_or(UNMAPPED_CODE)
    }

    /// Reverse lookup: canonical label for a code.
    pub fn label_of(&self, code: i32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(label, _)| *label)
    }

    /// Canonical labels in code order, e.g. for populating a select box.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }
}

pub const SEX: CategoryTable = CategoryTable {
    field: "sex",
    entries: &[("Male", 1), ("Female", 0)],
    matching: Matching::CaseInsensitive,
};

pub const CHEST_PAIN_TYPE: CategoryTable = CategoryTable {
    field: "chest_pain_type",
    entries: &[
        ("Typical Angina", 0),
        ("Atypical Angina", 1),
        ("Non-anginal Pain", 2),
        ("Asymptomatic", 3),
    ],
    matching: Matching::Exact,
};

pub const FASTING_BLOOD_SUGAR_HIGH: CategoryTable = CategoryTable {
    field: "fasting_blood_sugar_high",
    entries: &[("Yes", 1), ("No", 0)],
    matching: Matching::CaseInsensitive,
};

pub const RESTING_ECG: CategoryTable = CategoryTable {
    field: "resting_ecg",
    entries: &[
        ("Normal", 0),
        ("ST-T Wave Abnormality", 1),
        ("Left Ventricular Hypertrophy", 2),
    ],
    matching: Matching::Exact,
};

pub const EXERCISE_ANGINA: CategoryTable = CategoryTable {
    field: "exercise_angina",
    entries: &[("Yes", 1), ("No", 0)],
    matching: Matching::CaseInsensitive,
};

pub const ST_SLOPE: CategoryTable = CategoryTable {
    field: "st_slope",
    entries: &[("Upsloping", 0), ("Flat", 1), ("Downsloping", 2)],
    matching: Matching::Exact,
};

pub const THALASSEMIA: CategoryTable = CategoryTable {
    field: "thalassemia",
    entries: &[
        ("Normal", 0),
        ("Fixed Defect", 1),
        ("Reversible Defect", 2),
        ("Unknown", 3),
    ],
    matching: Matching::Exact,
};

/// All heart tables, in feature-vector order.
pub const HEART_TABLES: [&CategoryTable; 7] = [
    &SEX,
    &CHEST_PAIN_TYPE,
    &FASTING_BLOOD_SUGAR_HIGH,
    &RESTING_ECG,
    &EXERCISE_ANGINA,
    &ST_SLOPE,
    &THALASSEMIA,
];

/// Find a table by field name.
pub fn table_for(field: &str) -> Option<&'static CategoryTable> {
    HEART_TABLES.iter().copied().find(|t| t.field == field)
}
