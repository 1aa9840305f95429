//! CLI entry-point listing the selectable symptom columns.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{cli::OutputFormat, config::Settings, data::ModelColumns, report::display_label};

/// Args for the `symptoms` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let columns = ModelColumns::load(&settings.columns_path())?;
    match args.format {
        OutputFormat::Text => {
            for column in columns.iter() {
                println!("{column:<24} {}", display_label(column));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(columns.as_slice())?),
    }
    Ok(())
}
