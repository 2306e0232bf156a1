//! Init command - prints the initial state derived from a schema.

use std::process::ExitCode;

use anyhow::{Context, Result};
use schemaform::initialize;

use crate::util::read_schema;

#[derive(clap::Args)]
pub struct Args {
    /// Path to the schema JSON (use '-' or omit for stdin)
    pub file: Option<String>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: Args) -> Result<ExitCode> {
    let schema = read_schema(args.file.as_deref())?;
    let state = initialize(&schema);
    let output = if args.compact {
        serde_json::to_string(&state)
    } else {
        serde_json::to_string_pretty(&state)
    }
    .context("Error serializing state")?;
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}
