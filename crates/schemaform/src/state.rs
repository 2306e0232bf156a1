//! Form state and its initialization from a schema.

use schemaform_schema::Schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::{derive_key, section_key};
use crate::store::{ExpandedSections, ValueStore, VisibleSections};
use crate::value::FieldValue;

/// The mutable runtime state of one form session.
///
/// Created by [`initialize`] and threaded explicitly through every engine
/// operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub values: ValueStore,
    pub visible: VisibleSections,
    pub expanded: ExpandedSections,
}

/// Derive the initial state of `schema`.
///
/// Every section starts visible; dependency rules are only consulted when a
/// field changes. Pure and repeatable: the same schema always yields the same
/// state.
pub fn initialize(schema: &Schema) -> FormState {
    let mut state = FormState::default();

    for section in &schema.sections {
        state.visible.insert(section.name.as_str());
        if section.pre_populate {
            state.expanded.insert(section.name.as_str());
        }
        for subsection in &section.sub_sections {
            if subsection.pre_populate {
                state
                    .expanded
                    .insert(section_key(&section.name, &subsection.name));
            }
        }
    }

    for entry in schema.walk() {
        let key = derive_key(&entry.section.name, &entry.subsection.name, entry.field);
        state
            .values
            .set(key, FieldValue::from(entry.field.default_text()));
    }

    debug!(
        sections = state.visible.len(),
        fields = state.values.len(),
        expanded = state.expanded.len(),
        "initialized form state"
    );
    state
}
