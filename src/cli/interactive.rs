//! Interactive session: each entered line is one complaint on the text path.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use colored::Colorize;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::{info, instrument, warn};

use crate::{
    cli::OutputFormat, config::Settings, context::TriageContext, error::TriageError,
    report::display_label,
};

const PROMPT: &str = "complaint> ";

/// Args for the `interactive` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Persist line history to this file (overrides TRIAGE_HISTORY).
    #[arg(long)]
    pub history: Option<PathBuf>,
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
}

/// Session-level commands recognised before text is treated as a complaint.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Help,
    Symptoms,
    Quit,
}

fn parse_command(line: &str) -> Option<SessionCommand> {
    match line.trim() {
        "/help" | "/?" => Some(SessionCommand::Help),
        "/symptoms" => Some(SessionCommand::Symptoms),
        "/quit" | "/exit" => Some(SessionCommand::Quit),
        _ => None,
    }
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let context = TriageContext::load(&settings)?;
    let history = args.history.or_else(|| settings.history.clone());

    let mut editor = DefaultEditor::new()?;
    if let Some(path) = &history {
        if path.exists() {
            let _ = editor.load_history(path);
        }
    }

    print_banner();
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.trim());
        }

        match parse_command(&line) {
            Some(SessionCommand::Quit) => break,
            Some(SessionCommand::Help) => print_banner(),
            Some(SessionCommand::Symptoms) => {
                for column in context.columns().iter() {
                    println!("  {}", display_label(column));
                }
            }
            None => match context.triage_text(&line) {
                Ok(report) => {
                    super::emit(&report, args.format)?;
                    println!();
                }
                Err(TriageError::EmptyComplaint) => {
                    println!("{}", "Please enter the patient's complaint text first.".yellow());
                }
                Err(err) => {
                    warn!(error = %err, "interaction failed");
                    println!("{}", err.to_string().red());
                }
            },
        }
    }

    if let Some(path) = &history {
        if let Err(err) = editor.save_history(path) {
            warn!(error = %err, path = %path.display(), "could not save history");
        }
    }
    info!("session closed");
    Ok(())
}

fn print_banner() {
    println!("{}", "Diagnosis prediction".bold().cyan());
    println!("Describe the patient's complaint in a sentence, e.g.");
    println!("  {}", "pasien mengeluh pusing dan mual sejak kemarin, disertai demam ringan".dimmed());
    println!(
        "Commands: {} list symptoms, {} this help, {} leave\n",
        "/symptoms".green(),
        "/help".green(),
        "/quit".green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_commands_are_recognised() {
        assert_eq!(parse_command(" /quit "), Some(SessionCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(SessionCommand::Quit));
        assert_eq!(parse_command("/symptoms"), Some(SessionCommand::Symptoms));
        assert_eq!(parse_command("pusing /quit"), None);
    }
}
