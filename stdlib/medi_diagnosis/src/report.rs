//! Data for the printable medical report
//!
//! Rendering (PDF layout, download links) belongs to the front end; this
//! module only assembles what it needs to draw.

use crate::input::{DiabetesInput, HeartInput};
use crate::interpret::{interpret_with, DisplayColor, MessageStyle};
use crate::kind::DiagnosisKind;
use crate::service::Diagnosis;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const REPORT_TITLE: &str = "Medical Report";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    pub title: String,
    pub kind: DiagnosisKind,
    pub patient_name: Option<String>,
    pub rows: Vec<ReportRow>,
    /// Sentence-style diagnosis line, e.g. "The person has diabetes."
    pub diagnosis: String,
    pub is_positive: bool,
    pub color: DisplayColor,
    pub generated_at: DateTime<Utc>,
}

impl DiagnosisReport {
    pub fn heart(name: Option<&str>, input: &HeartInput, diagnosis: &Diagnosis) -> Self {
        Self::build(name, DiagnosisKind::Heart, input.summary(), diagnosis)
    }

    pub fn diabetes(name: Option<&str>, input: &DiabetesInput, diagnosis: &Diagnosis) -> Self {
        Self::build(name, DiagnosisKind::Diabetes, input.summary(), diagnosis)
    }

    fn build(
        name: Option<&str>,
        kind: DiagnosisKind,
        summary: Vec<(&'static str, String)>,
        diagnosis: &Diagnosis,
    ) -> Self {
        debug_assert_eq!(
            diagnosis.kind, kind,
            "report rows and diagnosis disagree on kind"
        );
        // The verdict belongs to the diagnosis; title and message follow it.
        let kind = diagnosis.kind;
        let patient_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let mut rows = Vec::with_capacity(summary.len() + 1);
        rows.push(ReportRow {
            label: "Name".into(),
            value: patient_name.clone().unwrap_or_default(),
        });
        rows.extend(summary.into_iter().map(|(label, value)| ReportRow {
            label: label.to_string(),
            value,
        }));
        let sentence = interpret_with(kind, diagnosis.verdict, MessageStyle::Sentence);
        Self {
            title: REPORT_TITLE.to_string(),
            kind,
            patient_name,
            rows,
            color: sentence.color(),
            is_positive: sentence.is_positive,
            diagnosis: sentence.verdict_message,
            generated_at: Utc::now(),
        }
    }

    /// Suggested download name, e.g. `Jane_Heart Disease_Report.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_Report.pdf",
            self.patient_name.as_deref().unwrap_or(""),
            self.kind.title()
        )
    }

    /// Plain-text rendering, one `label: value` line per row.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.title);
        for row in &self.rows {
            out.push_str(&format!("{}: {}\n", row.label, row.value));
        }
        out.push_str(&format!("Diagnosis: {}\n", self.diagnosis));
        out
    }
}
