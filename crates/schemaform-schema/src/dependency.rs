//! Declarative section dependency rules.

use serde::{Deserialize, Serialize};

use crate::de;

/// Shows `dependent_section` while the field `field_name` of `section_name`
/// holds `value`, and hides it otherwise.
///
/// `field_name` is matched against the triggering field's reference id (or
/// its ordering index when the reference id is empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRule {
    #[serde(alias = "section")]
    pub section_name: String,
    #[serde(alias = "fieldRefId", deserialize_with = "de::string_or_number")]
    pub field_name: String,
    #[serde(alias = "triggerValue", deserialize_with = "de::string_or_number")]
    pub value: String,
    #[serde(rename = "dependentSectionValue", alias = "dependentSection")]
    pub dependent_section: String,
}

impl DependencyRule {
    /// Whether `value` keeps the dependent section visible.
    pub fn shows_for(&self, value: &str) -> bool {
        self.value == value
    }
}
