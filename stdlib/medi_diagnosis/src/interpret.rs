//! Verdict to message translation

use crate::backend::Verdict;
use crate::kind::DiagnosisKind;
use serde::{Deserialize, Serialize};

/// Which wording to use for a verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    /// Short status line, e.g. "Heart disease detected".
    #[default]
    Headline,
    /// Full sentence, e.g. "The person has heart disease."
    Sentence,
}

impl std::str::FromStr for MessageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headline" => Ok(MessageStyle::Headline),
            "sentence" => Ok(MessageStyle::Sentence),
            other => Err(format!("unknown message style: {other}")),
        }
    }
}

/// RGB color used to render a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColor(pub u8, pub u8, pub u8);

impl DisplayColor {
    pub const POSITIVE: DisplayColor = DisplayColor(255, 0, 0);
    pub const NEGATIVE: DisplayColor = DisplayColor(0, 128, 0);

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Message pair for one diagnosis kind and style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub positive: &'static str,
    pub negative: &'static str,
}

pub fn messages(kind: DiagnosisKind, style: MessageStyle) -> Messages {
    match (kind, style) {
        (DiagnosisKind::Heart, MessageStyle::Headline) => Messages {
            positive: "Heart disease detected",
            negative: "No heart disease detected",
        },
        (DiagnosisKind::Heart, MessageStyle::Sentence) => Messages {
            positive: "The person has heart disease.",
            negative: "The person does not have heart disease.",
        },
        (DiagnosisKind::Diabetes, MessageStyle::Headline) => Messages {
            positive: "Diabetes detected",
            negative: "No diabetes detected",
        },
        (DiagnosisKind::Diabetes, MessageStyle::Sentence) => Messages {
            positive: "The person has diabetes.",
            negative: "The person does not have diabetes.",
        },
    }
}

/// Outbound result handed to the API/UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    #[serde(rename = "prediction")]
    pub verdict_message: String,
    pub is_positive: bool,
}

impl Interpretation {
    pub fn color(&self) -> DisplayColor {
        if self.is_positive {
            DisplayColor::POSITIVE
        } else {
            DisplayColor::NEGATIVE
        }
    }
}

/// Headline interpretation of a verdict.
pub fn interpret(kind: DiagnosisKind, verdict: Verdict) -> Interpretation {
    interpret_with(kind, verdict, MessageStyle::Headline)
}

pub fn interpret_with(kind: DiagnosisKind, verdict: Verdict, style: MessageStyle) -> Interpretation {
    let m = messages(kind, style);
    let is_positive = verdict.is_positive();
    Interpretation {
        verdict_message: (if is_positive { m.positive } else { m.negative }).to_string(),
        is_positive,
    }
}
