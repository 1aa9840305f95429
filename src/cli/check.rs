//! CLI entry-point for the checked-symptom path.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{cli::OutputFormat, config::Settings, context::TriageContext};

/// Args for the `check` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Comma separated symptom columns (see `symptoms`).
    #[arg(long = "symptom", value_delimiter = ',')]
    pub symptoms: Vec<String>,
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let context = TriageContext::load(&settings)?;
    let report = context.triage_selection(&args.symptoms)?;
    super::emit(&report, args.format)
}
