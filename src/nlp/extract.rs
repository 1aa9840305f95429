//! Dictionary-based symptom extraction from free-text complaints.

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::data::SymptomDictionary;

/// How candidates that overlap in the text are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Every candidate contained in the text contributes its label.
    #[default]
    All,
    /// Longer candidates claim their span first; shorter ones only match outside it.
    LongestFirst,
}

/// A dictionary hit with byte offsets into the lower-cased text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomSpan {
    pub start: usize,
    pub end: usize,
    pub candidate: String,
    pub label: String,
}

impl SymptomSpan {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

/// Standardized labels whose candidate occurs anywhere in `text`, ignoring case.
pub fn extract_symptoms(text: &str, dictionary: &SymptomDictionary) -> BTreeSet<String> {
    extract_with_policy(text, dictionary, MatchPolicy::All)
}

pub fn extract_with_policy(
    text: &str,
    dictionary: &SymptomDictionary,
    policy: MatchPolicy,
) -> BTreeSet<String> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }
    match policy {
        MatchPolicy::All => {
            let lower = text.to_lowercase();
            dictionary
                .iter()
                .filter(|(candidate, _)| lower.contains(candidate))
                .map(|(_, label)| label.to_string())
                .collect()
        }
        MatchPolicy::LongestFirst => find_spans(text, dictionary, policy)
            .into_iter()
            .map(|span| span.label)
            .collect(),
    }
}

/// Locate candidate occurrences, ordered by start offset.
///
/// Under [`MatchPolicy::All`] every non-overlapping occurrence of each
/// candidate is reported, so spans of different candidates may overlap.
/// Under [`MatchPolicy::LongestFirst`] no two returned spans overlap.
pub fn find_spans(text: &str, dictionary: &SymptomDictionary, policy: MatchPolicy) -> Vec<SymptomSpan> {
    let lower = text.to_lowercase();
    let mut spans: Vec<SymptomSpan> = Vec::new();
    for (candidate, label) in dictionary.iter() {
        let mut start_pos = 0;
        while let Some(pos) = lower[start_pos..].find(candidate) {
            let start = start_pos + pos;
            let end = start + candidate.len();
            start_pos = end;
            if policy == MatchPolicy::LongestFirst && spans.iter().any(|s| s.overlaps(start, end)) {
                continue;
            }
            spans.push(SymptomSpan {
                start,
                end,
                candidate: candidate.to_string(),
                label: label.to_string(),
            });
        }
    }
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    spans
}
