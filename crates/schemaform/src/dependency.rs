//! Dependency resolution
//!
//! When a field changes, every rule triggered by that field is evaluated in
//! declaration order against the new value. A match shows the dependent
//! section; a mismatch hides it and resets the values of all its fields.
//! Later rules may re-show a section an earlier rule just hid.

use ahash::AHashMap;
use schemaform_schema::{DependencyRule, HiddenFields, Schema, walk_section};
use tracing::{debug, trace, warn};

use crate::key::{FieldKey, derive_key};
use crate::state::FormState;
use crate::value::FieldValue;

/// Rules grouped by their triggering (section, field reference), with
/// declaration order kept inside each group.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    rules: Vec<DependencyRule>,
    by_trigger: AHashMap<String, AHashMap<String, Vec<usize>>>,
}

impl DependencyIndex {
    pub fn new(rules: &[DependencyRule]) -> Self {
        let mut by_trigger: AHashMap<String, AHashMap<String, Vec<usize>>> = AHashMap::new();
        for (position, rule) in rules.iter().enumerate() {
            by_trigger
                .entry(rule.section_name.clone())
                .or_default()
                .entry(rule.field_name.clone())
                .or_default()
                .push(position);
        }
        Self {
            rules: rules.to_vec(),
            by_trigger,
        }
    }

    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(&schema.dependencies)
    }

    /// Rules triggered by `field` of `section`, in declaration order.
    pub fn rules_for<'a>(
        &'a self,
        section: &str,
        field: &str,
    ) -> impl Iterator<Item = &'a DependencyRule> + 'a {
        self.by_trigger
            .get(section)
            .and_then(|fields| fields.get(field))
            .into_iter()
            .flatten()
            .map(|&position| &self.rules[position])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Apply the dependency rules triggered by `key` taking `value`.
///
/// Only visibility and the values of hidden sections are touched; the write
/// of `value` itself is the caller's. A key that cannot be split into its
/// parts triggers nothing.
pub fn on_field_changed(
    mut state: FormState,
    key: &FieldKey,
    value: &FieldValue,
    rules: &DependencyIndex,
    schema: &Schema,
) -> FormState {
    let Some(parts) = key.parts() else {
        warn!(%key, "field key has no recoverable section/reference; skipping dependency rules");
        return state;
    };
    let value = value.as_text();

    for rule in rules.rules_for(parts.section, parts.identity) {
        if rule.shows_for(&value) {
            trace!(section = %rule.dependent_section, "dependency rule matched");
            if state.visible.insert(rule.dependent_section.as_str()) {
                debug!(section = %rule.dependent_section, trigger = %key, "section shown");
            }
            continue;
        }

        if state.visible.remove(&rule.dependent_section) {
            debug!(section = %rule.dependent_section, trigger = %key, "section hidden");
        }
        match schema.section(&rule.dependent_section) {
            Some(section) => {
                for entry in walk_section(section, HiddenFields::Include) {
                    let dependent = derive_key(&section.name, &entry.subsection.name, entry.field);
                    state.values.clear(dependent.as_str());
                }
            }
            None => warn!(
                section = %rule.dependent_section,
                "dependency rule names a section missing from the schema"
            ),
        }
    }

    state
}
