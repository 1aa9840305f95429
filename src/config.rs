//! Runtime configuration utilities for symptom-triage.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use clap::ValueEnum;
use serde::Deserialize;

use crate::nlp::extract::MatchPolicy;

const DEFAULT_DICTIONARY: &str = "symptom_dictionary.csv";
const DEFAULT_COLUMNS: &str = "model_columns.json";
const DEFAULT_MODEL: &str = "model.json";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder holding the dictionary, column list and model artefacts.
    pub assets_dir: PathBuf,
    /// Explicit curated dictionary path; defaults inside `assets_dir`.
    pub dictionary: Option<PathBuf>,
    /// Explicit model column list path; defaults inside `assets_dir`.
    pub columns: Option<PathBuf>,
    /// Explicit classifier artefact path; defaults inside `assets_dir`.
    pub model: Option<PathBuf>,
    /// How overlapping dictionary candidates are resolved.
    pub match_policy: MatchPolicy,
    /// Optional history file for the interactive session.
    pub history: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let assets_dir = env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./assets"));
        let dictionary = env::var("SYMPTOM_DICTIONARY").ok().map(PathBuf::from);
        let columns = env::var("MODEL_COLUMNS").ok().map(PathBuf::from);
        let model = env::var("MODEL_PATH").ok().map(PathBuf::from);
        let match_policy = match env::var("TRIAGE_MATCH_POLICY") {
            Ok(raw) => <MatchPolicy as ValueEnum>::from_str(raw.trim(), true)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("parsing TRIAGE_MATCH_POLICY={raw}"))?,
            Err(_) => MatchPolicy::default(),
        };
        let history = env::var("TRIAGE_HISTORY").ok().map(PathBuf::from);

        Ok(Self {
            assets_dir,
            dictionary,
            columns,
            model,
            match_policy,
            history,
        })
    }

    /// Settings rooted at `assets_dir` with every other knob at its default.
    pub fn with_assets_dir<P: Into<PathBuf>>(assets_dir: P) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            dictionary: None,
            columns: None,
            model: None,
            match_policy: MatchPolicy::default(),
            history: None,
        }
    }

    /// Convenience helper for derived asset path segments.
    pub fn join_assets<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.assets_dir.join(path)
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.dictionary
            .clone()
            .unwrap_or_else(|| self.join_assets(DEFAULT_DICTIONARY))
    }

    pub fn columns_path(&self) -> PathBuf {
        self.columns
            .clone()
            .unwrap_or_else(|| self.join_assets(DEFAULT_COLUMNS))
    }

    pub fn model_path(&self) -> PathBuf {
        self.model
            .clone()
            .unwrap_or_else(|| self.join_assets(DEFAULT_MODEL))
    }
}
