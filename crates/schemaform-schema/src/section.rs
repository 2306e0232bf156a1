//! Sections and subsections: the two grouping levels of a form.

use serde::{Deserialize, Serialize};

use crate::de;
use crate::field::Field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique within the schema.
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default, alias = "subsections", alias = "subSection")]
    pub sub_sections: Vec<SubSection>,
    /// Section starts expanded.
    #[serde(
        default,
        alias = "prepopulate",
        alias = "expanded",
        deserialize_with = "de::flexible_bool"
    )]
    pub pre_populate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    /// Unique within its section.
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Minimum attachment count for attachment fields of this subsection.
    #[serde(
        default,
        alias = "minCount",
        alias = "minAttachments",
        deserialize_with = "de::flexible_count"
    )]
    pub min_capture: Option<usize>,
    /// Maximum attachment count for attachment fields of this subsection.
    #[serde(
        default,
        alias = "maxCount",
        alias = "maxAttachments",
        deserialize_with = "de::flexible_count"
    )]
    pub max_capture: Option<usize>,
    #[serde(
        default,
        alias = "prepopulate",
        alias = "expanded",
        deserialize_with = "de::flexible_bool"
    )]
    pub pre_populate: bool,
}

impl SubSection {
    /// Fields sorted by ascending `order`, ties kept in list order.
    pub fn fields_in_order(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by_key(|field| field.order);
        fields
    }

    /// Declared minimum attachment count; zero counts as undeclared.
    pub fn min_capture(&self) -> Option<usize> {
        self.min_capture.filter(|&n| n > 0)
    }

    /// Declared maximum attachment count; zero counts as undeclared.
    pub fn max_capture(&self) -> Option<usize> {
        self.max_capture.filter(|&n| n > 0)
    }
}
