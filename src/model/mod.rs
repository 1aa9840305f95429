//! Diagnosis categories and the classifier contract.

pub mod logistic;

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use crate::{error::TriageError, nlp::FeatureVector};

pub use logistic::OneVsRestLogistic;

/// The five independent output classes, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosisCategory {
    #[serde(rename = "DIAGNOSA_J")]
    Respiratory,
    #[serde(rename = "DIAGNOSA_R")]
    General,
    #[serde(rename = "DIAGNOSA_I")]
    Circulatory,
    #[serde(rename = "DIAGNOSA_K")]
    Digestive,
    #[serde(rename = "DIAGNOSA_LAINNYA")]
    Other,
}

impl DiagnosisCategory {
    pub const ALL: [Self; 5] = [
        Self::Respiratory,
        Self::General,
        Self::Circulatory,
        Self::Digestive,
        Self::Other,
    ];

    /// Target column name used by the trained model.
    pub fn code(self) -> &'static str {
        match self {
            Self::Respiratory => "DIAGNOSA_J",
            Self::General => "DIAGNOSA_R",
            Self::Circulatory => "DIAGNOSA_I",
            Self::Digestive => "DIAGNOSA_K",
            Self::Other => "DIAGNOSA_LAINNYA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Respiratory => "Diagnosis related to the respiratory system.",
            Self::General => "Diagnosis related to non-specific or general symptoms.",
            Self::Circulatory => "Diagnosis related to the circulatory system.",
            Self::Digestive => "Diagnosis related to the digestive system.",
            Self::Other => "Other diagnosis outside categories J, R, I, K.",
        }
    }
}

/// Multi-output classifier over a binary symptom matrix.
///
/// `predict` returns a `(rows, 5)` matrix of 0/1 indicators. `predict_proba`
/// returns one `(rows, 2)` matrix per category holding `[P(0), P(1)]`.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, x: &Array2<f64>) -> anyhow::Result<Array2<u8>>;
    fn predict_proba(&self, x: &Array2<f64>) -> anyhow::Result<Vec<Array2<f64>>>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: DiagnosisCategory,
    pub positive: bool,
    /// Positive-class probability in `[0, 1]`.
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub scores: Vec<CategoryScore>,
}

impl Prediction {
    pub fn positives(&self) -> impl Iterator<Item = &CategoryScore> {
        self.scores.iter().filter(|s| s.positive)
    }
}

/// Run both classifier operations on one feature vector.
///
/// Any failure, including a malformed result shape, is reported as
/// [`TriageError::Prediction`] and no partial scores are returned.
pub fn classify(classifier: &dyn Classifier, vector: &FeatureVector) -> Result<Prediction, TriageError> {
    if vector.len() != classifier.n_features() {
        return Err(TriageError::ShapeMismatch {
            expected: classifier.n_features(),
            found: vector.len(),
        });
    }
    let x = vector.as_row();
    let labels = classifier
        .predict(&x)
        .map_err(|e| TriageError::Prediction(format!("{e:#}")))?;
    let probabilities = classifier
        .predict_proba(&x)
        .map_err(|e| TriageError::Prediction(format!("{e:#}")))?;

    let n = DiagnosisCategory::ALL.len();
    if labels.dim() != (1, n) {
        return Err(TriageError::Prediction(format!(
            "predict returned shape {:?}, expected (1, {n})",
            labels.dim()
        )));
    }
    if probabilities.len() != n || probabilities.iter().any(|p| p.dim() != (1, 2)) {
        return Err(TriageError::Prediction(
            "predict_proba returned an unexpected shape".into(),
        ));
    }

    let mut scores = Vec::with_capacity(n);
    for (idx, category) in DiagnosisCategory::ALL.into_iter().enumerate() {
        let probability = probabilities[idx][[0, 1]];
        if !(0.0..=1.0).contains(&probability) {
            return Err(TriageError::Prediction(format!(
                "probability {probability} for {} is outside [0, 1]",
                category.code()
            )));
        }
        scores.push(CategoryScore {
            category,
            positive: labels[[0, idx]] == 1,
            probability,
        });
    }
    debug!(positives = scores.iter().filter(|s| s.positive).count(), "classified");
    Ok(Prediction { scores })
}
