//! Ordered feature schema expected by the trained classifier.

use std::{collections::HashMap, fs, path::Path};

use strsim::jaro_winkler;
use tracing::info;

use crate::error::TriageError;

/// Minimum Jaro-Winkler similarity before a column is offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.82;

/// Fixed, ordered list of symptom column names.
#[derive(Debug, Clone)]
pub struct ModelColumns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ModelColumns {
    /// Build from an ordered list; empty lists and duplicates are rejected.
    pub fn new(names: Vec<String>) -> Result<Self, TriageError> {
        if names.is_empty() {
            return Err(TriageError::InvalidColumns("column list is empty".into()));
        }
        let mut index = HashMap::with_capacity(names.len());
        for (pos, name) in names.iter().enumerate() {
            if index.insert(name.clone(), pos).is_some() {
                return Err(TriageError::InvalidColumns(format!(
                    "column '{name}' appears more than once"
                )));
            }
        }
        Ok(Self { names, index })
    }

    /// Load a JSON array of column names.
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        if !path.exists() {
            return Err(TriageError::AssetMissing {
                path: path.to_path_buf(),
            });
        }
        let malformed = |reason: String| TriageError::AssetMalformed {
            kind: "model columns",
            path: path.to_path_buf(),
            reason,
        };
        let raw = fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        let names: Vec<String> = serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
        let columns = Self::new(names).map_err(|e| malformed(e.to_string()))?;
        info!(path = %path.display(), columns = columns.len(), "loaded model columns");
        Ok(columns)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Map a user-typed symptom name to its canonical column.
    ///
    /// Exact matches win; otherwise case and `_`/space differences are ignored.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let trimmed = name.trim();
        if let Some(&pos) = self.index.get(trimmed) {
            return Some(&self.names[pos]);
        }
        let key = fold(trimmed);
        self.names
            .iter()
            .find(|column| fold(column) == key)
            .map(String::as_str)
    }

    /// Closest column to an unrecognised name, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let target = fold(name);
        let mut best: Option<(f64, &str)> = None;
        for column in &self.names {
            let score = jaro_winkler(&target, &fold(column));
            if score > best.map_or(0.0, |(s, _)| s) {
                best = Some((score, column.as_str()));
            }
        }
        best.filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
            .map(|(_, column)| column)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}
