//! Domain errors surfaced to the user for a single interaction or at startup.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    /// A required asset file is absent; startup cannot continue.
    #[error("asset file '{}' not found", .path.display())]
    AssetMissing { path: PathBuf },

    #[error("could not read {kind} '{}': {reason}", .path.display())]
    AssetMalformed {
        kind: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("invalid model columns: {0}")]
    InvalidColumns(String),

    #[error("invalid classifier: {0}")]
    InvalidModel(String),

    /// Complaint text was empty or whitespace only.
    #[error("complaint text is empty")]
    EmptyComplaint,

    #[error("unknown symptom(s): {}", .0.join(", "))]
    UnknownSymptoms(Vec<String>),

    #[error("feature width mismatch: classifier expects {expected} columns, got {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("prediction failed: {0}")]
    Prediction(String),
}
