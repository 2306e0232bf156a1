//! The schema document: sections plus dependency rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::dependency::DependencyRule;
use crate::error::SchemaError;
use crate::section::Section;

/// A parsed form schema. Read-only for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, alias = "dependencyRules", alias = "dependency")]
    pub dependencies: Vec<DependencyRule>,
}

/// Accepted top-level shapes: a full document or a bare section list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaRepr {
    Document(Schema),
    Sections(Vec<Section>),
}

impl Schema {
    pub fn new(sections: Vec<Section>, dependencies: Vec<DependencyRule>) -> Self {
        Self {
            sections,
            dependencies,
        }
    }

    /// Parse and check a schema document.
    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        let value: JsonValue = serde_json::from_str(source)?;
        Self::from_json_value(value)
    }

    /// Check a schema from an already-decoded JSON value.
    pub fn from_json_value(value: JsonValue) -> Result<Self, SchemaError> {
        let schema = match serde_json::from_value::<SchemaRepr>(value.clone()) {
            Ok(SchemaRepr::Document(schema)) => schema,
            Ok(SchemaRepr::Sections(sections)) => Schema::new(sections, Vec::new()),
            // Re-run the strict parse so the error points at the actual problem.
            Err(_) => serde_json::from_value::<Schema>(value)?,
        };
        schema.check()?;
        Ok(schema)
    }

    /// Check the uniqueness constraints field identity relies on.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut sections = HashSet::new();
        for section in &self.sections {
            if !sections.insert(section.name.as_str()) {
                return Err(SchemaError::DuplicateSection {
                    name: section.name.clone(),
                });
            }
            let mut subsections = HashSet::new();
            for sub in &section.sub_sections {
                if !subsections.insert(sub.name.as_str()) {
                    return Err(SchemaError::DuplicateSubSection {
                        section: section.name.clone(),
                        name: sub.name.clone(),
                    });
                }
                let mut fields = HashSet::new();
                for field in &sub.fields {
                    let identity = field.identity();
                    if !fields.insert((field.name.as_str(), identity.clone())) {
                        return Err(SchemaError::DuplicateField {
                            section: section.name.clone(),
                            subsection: sub.name.clone(),
                            field: field.name.clone(),
                            identity,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Total number of fields, hidden ones included.
    pub fn field_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.sub_sections)
            .map(|sub| sub.fields.len())
            .sum()
    }
}
