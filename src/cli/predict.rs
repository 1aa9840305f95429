//! CLI entry-point for the free-text complaint path.

use anyhow::Result;
use clap::Args as ClapArgs;
use colored::Colorize;
use tracing::{instrument, warn};

use crate::{cli::OutputFormat, config::Settings, context::TriageContext, error::TriageError};

/// Args for the `predict` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Patient complaint, e.g. "pasien mengeluh pusing dan mual sejak kemarin".
    #[arg(long)]
    pub text: String,
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let context = TriageContext::load(&settings)?;
    match context.triage_text(&args.text) {
        Ok(report) => super::emit(&report, args.format),
        Err(TriageError::EmptyComplaint) => {
            warn!("empty complaint; prediction skipped");
            eprintln!("{}", "Please enter the patient's complaint text first.".yellow());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
