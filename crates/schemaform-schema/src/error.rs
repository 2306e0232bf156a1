//! Error types for schema loading

use thiserror::Error;

/// A schema document that cannot back a form session.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed schema document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate section '{name}'")]
    DuplicateSection { name: String },

    #[error("duplicate subsection '{name}' in section '{section}'")]
    DuplicateSubSection { section: String, name: String },

    #[error("duplicate field '{field}' (identity '{identity}') in '{section}' / '{subsection}'")]
    DuplicateField {
        section: String,
        subsection: String,
        field: String,
        identity: String,
    },
}
