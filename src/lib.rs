//! Symptom triage: complaint text to symptom features to diagnosis categories.

pub mod cli;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod report;

pub use context::TriageContext;
pub use error::TriageError;
