//! Binary feature vector assembly in the classifier's column order.

use std::collections::HashSet;

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use crate::data::ModelColumns;

/// One 0/1 indicator per model column, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<u8>,
}

impl FeatureVector {
    /// All-zero vector over `columns`.
    pub fn zeros(columns: &ModelColumns) -> Self {
        Self {
            columns: columns.as_slice().to_vec(),
            values: vec![0; columns.len()],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<u8> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }

    /// Columns currently set to 1.
    pub fn active(&self) -> Vec<&str> {
        self.columns
            .iter()
            .zip(&self.values)
            .filter(|(_, &v)| v == 1)
            .map(|(c, _)| c.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Single-row design matrix with shape `(1, len)`.
    pub fn as_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, self.values.len()), |(_, j)| f64::from(self.values[j]))
    }
}

/// Feature vector plus the labels that had no matching column.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub vector: FeatureVector,
    pub dropped: Vec<String>,
}

/// Set every column named in `labels` to 1; unknown labels are collected, not rejected.
pub fn assemble<'a, I>(labels: I, columns: &ModelColumns) -> Assembly
where
    I: IntoIterator<Item = &'a str>,
{
    let mut vector = FeatureVector::zeros(columns);
    let mut dropped = Vec::new();
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            continue;
        }
        match columns.position(label) {
            Some(idx) => vector.values[idx] = 1,
            None => dropped.push(label.to_string()),
        }
    }
    debug!(
        active = vector.active().len(),
        dropped = dropped.len(),
        "assembled feature vector"
    );
    Assembly { vector, dropped }
}
