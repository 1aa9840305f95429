//! One-vs-rest logistic classifier loaded from a JSON artefact.

use std::{fs, path::Path};

use anyhow::{bail, Result};
use ndarray::{concatenate, Array1, Array2, Axis};
use serde::Deserialize;
use tracing::info;

use super::{Classifier, DiagnosisCategory};
use crate::{data::ModelColumns, error::TriageError};

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    #[serde(default)]
    columns: Option<Vec<String>>,
    categories: Vec<UnitArtifact>,
}

#[derive(Debug, Deserialize)]
struct UnitArtifact {
    name: String,
    intercept: f64,
    weights: Vec<f64>,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// Independent binary logistic units, one per diagnosis category.
#[derive(Debug)]
pub struct OneVsRestLogistic {
    /// matrix with shape (f + 1, c)
    /// ----------------------------
    ///
    /// - row 0 holds the intercepts
    /// - f = number of features
    /// - c = number of categories
    weights: Array2<f64>,
    thresholds: Array1<f64>,
}

impl OneVsRestLogistic {
    pub fn new(
        intercepts: Array1<f64>,
        weights: Array2<f64>,
        thresholds: Array1<f64>,
    ) -> Result<Self, TriageError> {
        let n = DiagnosisCategory::ALL.len();
        if intercepts.len() != n || weights.ncols() != n || thresholds.len() != n {
            return Err(TriageError::InvalidModel(format!(
                "expected {n} categories, got intercepts={} weights={} thresholds={}",
                intercepts.len(),
                weights.ncols(),
                thresholds.len()
            )));
        }
        if thresholds.iter().any(|t| !(*t > 0.0 && *t < 1.0)) {
            return Err(TriageError::InvalidModel(
                "thresholds must lie strictly between 0 and 1".into(),
            ));
        }
        let weights = concatenate(
            Axis(0),
            &[intercepts.view().insert_axis(Axis(0)), weights.view()],
        )
        .map_err(|e| TriageError::InvalidModel(e.to_string()))?;
        Ok(Self {
            weights,
            thresholds,
        })
    }

    /// Load the artefact and check it against the expected column schema.
    pub fn load(path: &Path, columns: &ModelColumns) -> Result<Self, TriageError> {
        if !path.exists() {
            return Err(TriageError::AssetMissing {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| malformed(path, e.to_string()))?;
        let model = Self::from_json(&raw, columns).map_err(|e| malformed(path, e.to_string()))?;
        info!(
            path = %path.display(),
            features = model.n_features(),
            "loaded classifier"
        );
        Ok(model)
    }

    pub fn from_json(raw: &str, columns: &ModelColumns) -> Result<Self, TriageError> {
        let artifact: ModelArtifact =
            serde_json::from_str(raw).map_err(|e| TriageError::InvalidModel(e.to_string()))?;

        if let Some(trained_on) = &artifact.columns {
            if trained_on.as_slice() != columns.as_slice() {
                return Err(TriageError::InvalidModel(
                    "artefact columns differ from the model column list".into(),
                ));
            }
        }
        let names: Vec<&str> = artifact.categories.iter().map(|u| u.name.as_str()).collect();
        let expected: Vec<&str> = DiagnosisCategory::ALL.iter().map(|c| c.code()).collect();
        if names != expected {
            return Err(TriageError::InvalidModel(format!(
                "categories {names:?} do not match {expected:?}"
            )));
        }

        let f = columns.len();
        let c = artifact.categories.len();
        let mut weights = Array2::zeros((f, c));
        for (j, unit) in artifact.categories.iter().enumerate() {
            if unit.weights.len() != f {
                return Err(TriageError::InvalidModel(format!(
                    "{} has {} weights for {f} columns",
                    unit.name,
                    unit.weights.len()
                )));
            }
            weights.column_mut(j).assign(&Array1::from(unit.weights.clone()));
        }
        let intercepts = artifact.categories.iter().map(|u| u.intercept).collect();
        let thresholds = artifact.categories.iter().map(|u| u.threshold).collect();
        Self::new(intercepts, weights, thresholds)
    }

    /// Positive-class probabilities with shape `(rows, categories)`.
    fn probabilities(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.n_features() {
            bail!(
                "expected {} features per row, got {}",
                self.n_features(),
                x.ncols()
            );
        }
        let bias = Array2::ones((x.nrows(), 1));
        let design = concatenate(Axis(1), &[bias.view(), x.view()])?;
        let mut result = design.dot(&self.weights);
        result.mapv_inplace(logit);
        Ok(result)
    }
}

impl Classifier for OneVsRestLogistic {
    fn n_features(&self) -> usize {
        // without intercept
        self.weights.nrows() - 1
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array2<u8>> {
        let probabilities = self.probabilities(x)?;
        Ok(Array2::from_shape_fn(probabilities.dim(), |(i, j)| {
            u8::from(probabilities[[i, j]] >= self.thresholds[j])
        }))
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<Array2<f64>>> {
        let probabilities = self.probabilities(x)?;
        Ok(probabilities
            .columns()
            .into_iter()
            .map(|p| {
                Array2::from_shape_fn((p.len(), 2), |(i, k)| if k == 1 { p[i] } else { 1.0 - p[i] })
            })
            .collect())
    }
}

fn logit(x: f64) -> f64 {
    1. / (1. + (-x).exp())
}

fn malformed(path: &Path, reason: String) -> TriageError {
    TriageError::AssetMalformed {
        kind: "classifier",
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn columns() -> ModelColumns {
        ModelColumns::new(vec!["BATUK".into(), "MUAL".into()]).unwrap()
    }

    fn artifact(weights_j: &str) -> String {
        format!(
            r#"{{"categories": [
                {{"name": "DIAGNOSA_J", "intercept": -1.0, "weights": {weights_j}}},
                {{"name": "DIAGNOSA_R", "intercept": -3.0, "weights": [0.0, 0.0]}},
                {{"name": "DIAGNOSA_I", "intercept": -3.0, "weights": [0.0, 0.0]}},
                {{"name": "DIAGNOSA_K", "intercept": -1.0, "weights": [0.0, 3.0], "threshold": 0.9}},
                {{"name": "DIAGNOSA_LAINNYA", "intercept": 0.0, "weights": [0.0, 0.0]}}
            ]}}"#
        )
    }

    #[test]
    fn probabilities_follow_logistic_units() {
        let model = OneVsRestLogistic::from_json(&artifact("[2.0, 0.0]"), &columns()).unwrap();
        let x = array![[1.0, 1.0]];

        let proba = model.predict_proba(&x).unwrap();
        assert_eq!(proba.len(), 5);
        assert!((proba[0][[0, 1]] - logit(1.0)).abs() < 1e-12);
        assert!((proba[0][[0, 0]] + proba[0][[0, 1]] - 1.0).abs() < 1e-12);
        assert!((proba[4][[0, 1]] - 0.5).abs() < 1e-12);

        let labels = model.predict(&x).unwrap();
        // K sits at logit(2.0) ~ 0.88, below its own 0.9 threshold
        assert_eq!(labels.row(0).to_vec(), vec![1, 0, 0, 0, 1]);
    }

    #[test]
    fn weight_width_must_match_columns() {
        let err = OneVsRestLogistic::from_json(&artifact("[2.0]"), &columns()).unwrap_err();
        assert!(err.to_string().contains("DIAGNOSA_J"));
    }

    #[test]
    fn category_order_is_enforced() {
        let raw = artifact("[2.0, 0.0]").replace("DIAGNOSA_R", "DIAGNOSA_X");
        assert!(OneVsRestLogistic::from_json(&raw, &columns()).is_err());
    }

    #[test]
    fn rejects_wrong_feature_width_at_predict_time() {
        let model = OneVsRestLogistic::from_json(&artifact("[2.0, 0.0]"), &columns()).unwrap();
        assert!(model.predict(&array![[1.0, 0.0, 1.0]]).is_err());
    }
}
