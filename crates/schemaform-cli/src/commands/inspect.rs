//! Inspect command - lists every field of a schema in walk order.

use std::process::ExitCode;

use anyhow::Result;
use schemaform::derive_key;
use schemaform::schema::{Field, InputType};
use schemaform_config::FormConfig;

use crate::util::{Palette, read_schema};

#[derive(clap::Args)]
pub struct Args {
    /// Path to the schema JSON (use '-' or omit for stdin)
    pub file: Option<String>,
}

pub fn run(args: Args, config: &FormConfig) -> Result<ExitCode> {
    let schema = read_schema(args.file.as_deref())?;
    let palette = Palette::new(config);

    for entry in schema.walk() {
        let key = derive_key(&entry.section.name, &entry.subsection.name, entry.field);
        let flags = flags(entry.field);
        if flags.is_empty() {
            println!("{key}  {}", entry.field.kind);
        } else {
            println!(
                "{key}  {}  {}",
                entry.field.kind,
                palette.dimmed(format!("[{}]", flags.join(", ")))
            );
        }
    }

    for rule in &schema.dependencies {
        println!(
            "{}",
            palette.dimmed(format!(
                "rule: {}.{} = {:?} -> {}",
                rule.section_name, rule.field_name, rule.value, rule.dependent_section
            ))
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn flags(field: &Field) -> Vec<String> {
    let mut flags = Vec::new();
    if field.mandatory {
        flags.push("mandatory".to_string());
    }
    if field.read_only {
        flags.push("read-only".to_string());
    }
    if field.hidden {
        flags.push("hidden".to_string());
    }
    if field.input_type != InputType::Text {
        flags.push(format!("{:?}", field.input_type).to_lowercase());
    }
    if let Some(min) = field.min_length() {
        flags.push(format!("min {min}"));
    }
    if let Some(max) = field.max_length() {
        flags.push(format!("max {max}"));
    }
    if field.kind.is_choice() {
        flags.push(format!("options {}", field.options().join("|")));
    }
    flags
}
