//! Immutable triage context built once at startup and borrowed per interaction.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    data::{ModelColumns, SymptomDictionary},
    error::TriageError,
    model::{classify, Classifier, OneVsRestLogistic},
    nlp::{assemble, extract_with_policy, FeatureVector, MatchPolicy},
    report::{Modality, Outcome, Report},
};

/// Dictionary, column schema and classifier for the lifetime of the process.
pub struct TriageContext {
    dictionary: SymptomDictionary,
    columns: ModelColumns,
    classifier: Box<dyn Classifier>,
    policy: MatchPolicy,
}

impl TriageContext {
    pub fn new(
        dictionary: SymptomDictionary,
        columns: ModelColumns,
        classifier: Box<dyn Classifier>,
        policy: MatchPolicy,
    ) -> Self {
        Self {
            dictionary,
            columns,
            classifier,
            policy,
        }
    }

    /// Load every asset named by `settings`; any missing file halts startup.
    #[instrument(skip(settings))]
    pub fn load(settings: &Settings) -> Result<Self> {
        let columns_path = settings.columns_path();
        let columns = ModelColumns::load(&columns_path)
            .with_context(|| format!("loading model columns from {}", columns_path.display()))?;

        let model_path = settings.model_path();
        let classifier = OneVsRestLogistic::load(&model_path, &columns)
            .with_context(|| format!("loading classifier from {}", model_path.display()))?;

        let dictionary_path = settings.dictionary_path();
        let dictionary = SymptomDictionary::load(&dictionary_path).with_context(|| {
            format!("loading symptom dictionary from {}", dictionary_path.display())
        })?;

        let context = Self::new(dictionary, columns, Box::new(classifier), settings.match_policy);
        let unreachable = context.unmapped_labels();
        if !unreachable.is_empty() {
            warn!(
                count = unreachable.len(),
                labels = ?unreachable,
                "dictionary labels with no model column will be ignored"
            );
        }
        info!(policy = ?context.policy, "triage context ready");
        Ok(context)
    }

    pub fn dictionary(&self) -> &SymptomDictionary {
        &self.dictionary
    }

    pub fn columns(&self) -> &ModelColumns {
        &self.columns
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Dictionary labels that never reach the classifier.
    pub fn unmapped_labels(&self) -> Vec<&str> {
        self.dictionary
            .labels()
            .into_iter()
            .filter(|label| !self.columns.contains(label))
            .collect()
    }

    /// Model columns no dictionary candidate produces; reachable only by selection.
    pub fn uncovered_columns(&self) -> Vec<&str> {
        let labels: BTreeSet<&str> = self.dictionary.labels();
        self.columns
            .iter()
            .filter(|column| !labels.contains(column))
            .collect()
    }

    /// Text path: extract symptoms, then predict only if at least one was found.
    pub fn triage_text(&self, text: &str) -> Result<Report, TriageError> {
        if text.trim().is_empty() {
            return Err(TriageError::EmptyComplaint);
        }
        let detected = extract_with_policy(text, &self.dictionary, self.policy);
        let assembly = assemble(detected.iter().map(String::as_str), &self.columns);
        let outcome = if detected.is_empty() {
            Outcome::NoSymptoms
        } else {
            self.predict_outcome(&assembly.vector)
        };
        info!(detected = detected.len(), "triaged complaint text");
        Ok(Report::new(Modality::Text, detected, assembly.dropped, outcome))
    }

    /// Checkbox path: every selected name must resolve to a model column.
    ///
    /// The classifier runs even when nothing is selected.
    pub fn triage_selection<S: AsRef<str>>(&self, selected: &[S]) -> Result<Report, TriageError> {
        let mut resolved = Vec::with_capacity(selected.len());
        let mut unknown = Vec::new();
        for name in selected {
            let name = name.as_ref();
            match self.columns.resolve(name) {
                Some(column) => resolved.push(column),
                None => unknown.push(match self.columns.suggest(name) {
                    Some(hint) => format!("{name} (did you mean {hint}?)"),
                    None => name.to_string(),
                }),
            }
        }
        if !unknown.is_empty() {
            return Err(TriageError::UnknownSymptoms(unknown));
        }
        let assembly = assemble(resolved.iter().copied(), &self.columns);
        let outcome = self.predict_outcome(&assembly.vector);
        info!(selected = resolved.len(), "triaged symptom selection");
        Ok(Report::new(
            Modality::Checkbox,
            resolved.into_iter().map(str::to_string),
            assembly.dropped,
            outcome,
        ))
    }

    fn predict_outcome(&self, vector: &FeatureVector) -> Outcome {
        match classify(self.classifier.as_ref(), vector) {
            Ok(prediction) => Outcome::from_prediction(&prediction),
            Err(err) => {
                warn!(error = %err, "prediction failed");
                Outcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }
}
