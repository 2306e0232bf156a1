//! Check command - replays a values file against a schema and validates it.
//!
//! Every entry goes through `FormSession::change` in file order, so the
//! dependency rules fire exactly as they would for a user filling the form.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use schemaform::{
    FieldValue, FormSession, Submission, SubmissionSink, SubmitError, SubmitOutcome,
};
use schemaform_config::FormConfig;
use tracing::info;

use crate::util::{Palette, read_input, read_schema};

#[derive(clap::Args)]
pub struct Args {
    /// Path to the schema JSON
    pub schema: String,

    /// JSON object mapping field keys to values, applied in order
    #[arg(long)]
    pub values: Option<String>,

    /// Write the submission here when the form is valid
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Persists submissions as pretty JSON.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SubmissionSink for FileSink {
    type Error = anyhow::Error;

    fn persist(&mut self, submission: &Submission) -> Result<()> {
        let json = serde_json::to_string_pretty(submission)?;
        fs::write(&self.path, json + "\n")
            .with_context(|| format!("Error writing {}", self.path.display()))?;
        info!(path = %self.path.display(), "submission written");
        Ok(())
    }
}

pub fn run(args: Args, config: &FormConfig) -> Result<ExitCode> {
    let schema = read_schema(Some(args.schema.as_str()))?;
    let palette = Palette::new(config);

    let mut session = FormSession::new(config.validation_options()?);
    session.load(Some(schema));

    if let Some(values) = args.values.as_deref() {
        let source = read_input(Some(values))?;
        let entries: IndexMap<String, FieldValue> = serde_json::from_str(&source)
            .with_context(|| format!("Invalid values file {values}"))?;
        for (key, value) in entries {
            session
                .change(&key, value)
                .with_context(|| format!("Cannot apply value for '{key}'"))?;
        }
    }

    let outcome = match args.output {
        Some(path) => session.submit_to(&mut FileSink::new(path)).map_err(|e| match e {
            SubmitError::Session(e) => anyhow::Error::new(e),
            SubmitError::Sink(e) => e,
        })?,
        None => session.prepare_submission()?,
    };

    match outcome {
        SubmitOutcome::Ready(submission) => {
            println!(
                "{}",
                palette.green(format!("✓ {} fields valid", submission.values.len()))
            );
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Invalid {
            first_error,
            error_count,
        } => {
            if let Some(errors) = session.errors() {
                for (key, error) in errors {
                    println!("{} {key}: {error}", palette.red("✗"));
                }
            }
            println!();
            println!(
                "{} (first: {first_error})",
                palette.red(format!("{error_count} field(s) failed validation"))
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
