//! Curated symptom dictionary: raw candidate phrase to standardized label.

use std::{collections::BTreeSet, fs::File, io::Read, path::Path};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::TriageError;

const CANDIDATE_HEADERS: &[&str] = &["candidate", "kandidat", "Kandidat dari Mesin (Sudah di-Stem)"];
const STANDARD_HEADERS: &[&str] = &["standard", "standar", "Gejala Standar (MOHON DIISI MANUAL)"];

/// One row of the curation sheet. Either cell may be blank.
#[derive(Debug, Deserialize)]
struct CurationRow {
    #[serde(alias = "kandidat", alias = "Kandidat dari Mesin (Sudah di-Stem)")]
    candidate: Option<String>,
    #[serde(alias = "standar", alias = "Gejala Standar (MOHON DIISI MANUAL)")]
    standard: Option<String>,
}

/// Immutable candidate → label map, longest candidate first.
///
/// Candidates are stored trimmed and lower-cased so matching only needs to
/// lower-case the incoming text. Ties in length keep their file order.
#[derive(Debug, Clone, Default)]
pub struct SymptomDictionary {
    entries: IndexMap<String, String>,
}

impl SymptomDictionary {
    /// Build from raw pairs, discarding blank candidates or labels.
    ///
    /// A repeated candidate keeps the label of its last occurrence.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries = IndexMap::new();
        for (candidate, label) in pairs {
            let candidate = candidate.as_ref().trim().to_lowercase();
            let label = label.as_ref().trim();
            if candidate.is_empty() || label.is_empty() {
                continue;
            }
            entries.insert(candidate, label.to_string());
        }
        entries.sort_by(|a, _, b, _| b.chars().count().cmp(&a.chars().count()));
        Self { entries }
    }

    /// Load the curation sheet from a CSV file.
    pub fn load(path: &Path) -> Result<Self, TriageError> {
        if !path.exists() {
            return Err(TriageError::AssetMissing {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|e| malformed(path, e.to_string()))?;
        let dictionary = Self::from_reader(file).map_err(|reason| malformed(path, reason))?;
        info!(
            path = %path.display(),
            entries = dictionary.len(),
            labels = dictionary.labels().len(),
            "loaded symptom dictionary"
        );
        Ok(dictionary)
    }

    /// Parse CSV content with a header row naming the candidate and label columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(|e| e.to_string())?.clone();
        for (wanted, role) in [(CANDIDATE_HEADERS, "candidate"), (STANDARD_HEADERS, "standard label")] {
            if !headers.iter().any(|h| wanted.contains(&h)) {
                return Err(format!(
                    "missing {role} column (expected one of {})",
                    wanted.join(" | ")
                ));
            }
        }

        let mut pairs = Vec::new();
        let mut skipped = 0usize;
        for result in reader.deserialize::<CurationRow>() {
            let row = result.map_err(|e| e.to_string())?;
            match (row.candidate, row.standard) {
                (Some(candidate), Some(standard)) => pairs.push((candidate, standard)),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "dropped uncurated dictionary rows");
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Iterate `(candidate, label)` pairs, longest candidate first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, l)| (c.as_str(), l.as_str()))
    }

    pub fn get(&self, candidate: &str) -> Option<&str> {
        self.entries.get(candidate).map(String::as_str)
    }

    /// Distinct standardized labels.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn malformed(path: &Path, reason: String) -> TriageError {
    TriageError::AssetMalformed {
        kind: "symptom dictionary",
        path: path.to_path_buf(),
        reason,
    }
}
