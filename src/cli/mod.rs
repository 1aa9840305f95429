//! Command-line interface wiring for symptom-triage.

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::{config::Settings, nlp::MatchPolicy, report::Report};

pub mod check;
pub mod inspect;
pub mod interactive;
pub mod predict;
pub mod symptoms;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Symptom-to-diagnosis triage assistant", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    assets: AssetArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Asset locations overriding `.env` / environment settings.
#[derive(Debug, Clone, ClapArgs)]
pub struct AssetArgs {
    /// Folder containing the default asset files.
    #[arg(long, global = true)]
    pub assets_dir: Option<PathBuf>,
    /// Curated symptom dictionary (CSV).
    #[arg(long, global = true)]
    pub dictionary: Option<PathBuf>,
    /// Model column list (JSON array).
    #[arg(long, global = true)]
    pub columns: Option<PathBuf>,
    /// Classifier artefact (JSON).
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,
    /// Resolution of overlapping dictionary candidates.
    #[arg(long, global = true, value_enum)]
    pub match_policy: Option<MatchPolicy>,
}

impl AssetArgs {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(dir) = self.assets_dir {
            settings.assets_dir = dir;
        }
        if self.dictionary.is_some() {
            settings.dictionary = self.dictionary;
        }
        if self.columns.is_some() {
            settings.columns = self.columns;
        }
        if self.model.is_some() {
            settings.model = self.model;
        }
        if let Some(policy) = self.match_policy {
            settings.match_policy = policy;
        }
        settings
    }
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, settings: Settings) -> Result<()> {
        let settings = self.assets.apply(settings);
        match self.command {
            Commands::Predict(args) => predict::run(args, settings),
            Commands::Check(args) => check::run(args, settings),
            Commands::Interactive(args) => interactive::run(args, settings),
            Commands::Symptoms(args) => symptoms::run(args, settings),
            Commands::Inspect => inspect::run(settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Predict diagnoses from a free-text complaint.
    Predict(predict::Args),
    /// Predict diagnoses from an explicit list of symptoms.
    Check(check::Args),
    /// Interactive session: one complaint per line.
    Interactive(interactive::Args),
    /// List the symptoms the model accepts.
    Symptoms(symptoms::Args),
    /// Summarise loaded assets and their coverage.
    Inspect,
}

/// Output rendering for reports.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text, coloured on a terminal.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print a report to stdout in the requested format.
pub fn emit(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.render(io::stdout().is_terminal())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
