use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nu_ansi_term::Color;
use tracing_subscriber::EnvFilter;

mod commands;
mod util;

#[derive(Parser)]
#[command(name = "schemaform", about = "Schema-driven form utilities")]
struct Cli {
    /// Path to a Schemaform.json (defaults to the nearest one above the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fields of a schema in walk order
    Inspect(commands::inspect::Args),
    /// Print the initial form state of a schema as JSON
    Init(commands::init::Args),
    /// Apply a values file to a schema and validate the result
    Check(commands::check::Args),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = util::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Inspect(args) => commands::inspect::run(args, &config),
        Commands::Init(args) => commands::init::run(args),
        Commands::Check(args) => commands::check::run(args, &config),
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", Color::Red.paint(format!("Error: {e:#}")));
            ExitCode::FAILURE
        }
    }
}
