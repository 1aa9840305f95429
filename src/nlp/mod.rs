//! Text processing: symptom extraction and feature assembly.

pub mod extract;
pub mod features;

pub use extract::{extract_symptoms, extract_with_policy, find_spans, MatchPolicy, SymptomSpan};
pub use features::{assemble, Assembly, FeatureVector};
