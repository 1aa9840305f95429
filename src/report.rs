//! Per-interaction result: detected symptoms and diagnosis findings.

use std::fmt::Write as _;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::model::{DiagnosisCategory, Prediction};

pub const NO_SYMPTOMS_IN_TEXT: &str = "No symptoms were recognized in the entered text.";
pub const NO_SYMPTOMS_SELECTED: &str = "No symptoms were selected.";
pub const NO_SIGNIFICANT_DIAGNOSIS: &str =
    "Based on the identified symptoms, no specific diagnosis was predicted with significance.";
pub const PREDICTION_SKIPPED: &str =
    "Prediction cannot be shown because no symptoms were identified.";
pub const PREDICTION_FAILED: &str = "Prediction could not be made because of an internal error.";

/// Which input modality produced the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub category: DiagnosisCategory,
    pub name: String,
    pub description: &'static str,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Diagnoses { findings: Vec<Finding> },
    NoSignificantDiagnosis,
    NoSymptoms,
    Failed { message: String },
}

impl Outcome {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let findings: Vec<Finding> = prediction
            .positives()
            .map(|score| Finding {
                category: score.category,
                name: display_label(score.category.code()),
                description: score.category.description(),
                probability: score.probability,
            })
            .collect();
        if findings.is_empty() {
            Self::NoSignificantDiagnosis
        } else {
            Self::Diagnoses { findings }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub modality: Modality,
    /// Standardized labels, sorted.
    pub symptoms: Vec<String>,
    /// Labels that are not model columns and so did not reach the classifier.
    pub dropped: Vec<String>,
    pub outcome: Outcome,
}

impl Report {
    pub fn new<I>(modality: Modality, symptoms: I, dropped: Vec<String>, outcome: Outcome) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut symptoms: Vec<String> = symptoms.into_iter().collect();
        symptoms.sort();
        symptoms.dedup();
        Self {
            modality,
            symptoms,
            dropped,
            outcome,
        }
    }

    pub fn findings(&self) -> &[Finding] {
        match &self.outcome {
            Outcome::Diagnoses { findings } => findings,
            _ => &[],
        }
    }

    /// Human-readable rendering; `styled` adds terminal colour.
    pub fn render(&self, styled: bool) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", paint("Identified symptoms", styled, |s| s.bold()));
        if self.symptoms.is_empty() {
            let empty = match self.modality {
                Modality::Text => NO_SYMPTOMS_IN_TEXT,
                Modality::Checkbox => NO_SYMPTOMS_SELECTED,
            };
            let _ = writeln!(out, "  {empty}");
        } else {
            for symptom in &self.symptoms {
                let _ = writeln!(out, "  - {}", display_label(symptom));
            }
        }
        if !self.dropped.is_empty() {
            let ignored = self
                .dropped
                .iter()
                .map(|d| display_label(d))
                .collect::<Vec<_>>()
                .join(", ");
            let line = format!("  (not model features, ignored: {ignored})");
            let _ = writeln!(out, "{}", paint(&line, styled, |s| s.dimmed()));
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", paint("Diagnosis prediction", styled, |s| s.bold()));
        match &self.outcome {
            Outcome::Diagnoses { findings } => {
                for finding in findings {
                    let _ = writeln!(out, "  {}", paint(&finding.name, styled, |s| s.green().bold()));
                    let _ = writeln!(out, "    {}", finding.description);
                    let _ = writeln!(out, "    Confidence: {}", format_probability(finding.probability));
                }
            }
            Outcome::NoSignificantDiagnosis => {
                let _ = writeln!(out, "  {NO_SIGNIFICANT_DIAGNOSIS}");
            }
            Outcome::NoSymptoms => {
                let _ = writeln!(out, "  {PREDICTION_SKIPPED}");
            }
            Outcome::Failed { message } => {
                let _ = writeln!(out, "  {}", paint(PREDICTION_FAILED, styled, |s| s.yellow()));
                let _ = writeln!(out, "  {}", paint(message, styled, |s| s.red()));
            }
        }
        out
    }
}

fn paint(text: &str, styled: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if styled {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// `NYERI_ULU-HATI` → `Nyeri Ulu-Hati`: underscores to spaces, then title case.
pub fn display_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_alpha = false;
    for ch in label.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Probability as a percentage with one decimal, e.g. `0.875` → `87.5%`.
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
