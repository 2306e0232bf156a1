use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use nu_ansi_term::{Color, Style};
use schemaform::schema::Schema;
use schemaform_config::FormConfig;
use tracing::debug;

/// Read input from file path or stdin.
/// - `None` or `Some("-")` reads from stdin
/// - `Some(path)` reads from file
pub fn read_input(file: Option<&str>) -> Result<String> {
    match file {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Error reading from stdin")?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Error reading {path}")),
    }
}

/// Helper to get display path for error messages
pub fn display_path(file: Option<&str>) -> &str {
    file.unwrap_or("<stdin>")
}

pub fn read_schema(file: Option<&str>) -> Result<Schema> {
    let source = read_input(file)?;
    Schema::from_json_str(&source)
        .with_context(|| format!("Invalid schema in {}", display_path(file)))
}

/// Load the explicit config file, or the nearest `Schemaform.json`.
pub fn load_config(path: Option<&Path>) -> Result<FormConfig> {
    if let Some(path) = path {
        return FormConfig::load(path)
            .with_context(|| format!("Error loading {}", path.display()));
    }
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let (config, found) = FormConfig::discover(&current_dir).context("Error loading config")?;
    match found {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("no config found, using defaults"),
    }
    Ok(config)
}

/// Paints text unless color is turned off in the config.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            color: config.cli.color,
        }
    }

    pub fn paint(&self, style: impl Into<Style>, text: impl AsRef<str>) -> String {
        if self.color {
            let style: Style = style.into();
            style.paint(text.as_ref()).to_string()
        } else {
            text.as_ref().to_string()
        }
    }

    pub fn red(&self, text: impl AsRef<str>) -> String {
        self.paint(Color::Red, text)
    }

    pub fn green(&self, text: impl AsRef<str>) -> String {
        self.paint(Color::Green, text)
    }

    pub fn dimmed(&self, text: impl AsRef<str>) -> String {
        self.paint(Style::new().dimmed(), text)
    }
}
