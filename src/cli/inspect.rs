//! CLI entry-point summarising loaded assets.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, context::TriageContext};

#[instrument(skip(settings))]
pub fn run(settings: Settings) -> Result<()> {
    let context = TriageContext::load(&settings)?;
    let dictionary = context.dictionary();
    println!("dictionary      {}", settings.dictionary_path().display());
    println!("  candidates    {}", dictionary.len());
    println!("  labels        {}", dictionary.labels().len());
    println!("columns         {}", settings.columns_path().display());
    println!("  features      {}", context.columns().len());
    println!("model           {}", settings.model_path().display());
    println!("match policy    {:?}", context.policy());

    let unmapped = context.unmapped_labels();
    if !unmapped.is_empty() {
        println!("labels without a model column: {}", unmapped.join(", "));
    }
    let uncovered = context.uncovered_columns();
    if !uncovered.is_empty() {
        println!("columns no candidate produces: {}", uncovered.join(", "));
    }
    Ok(())
}
