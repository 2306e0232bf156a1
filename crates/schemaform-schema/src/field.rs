//! Field declarations
//!
//! A `Field` is the atomic input unit of a form. Its `kind` selects the widget
//! and the validation rules that apply; `input_type` refines how free text is
//! interpreted (plain text, number, date).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::de;

// =============================================================================
// FieldType
// =============================================================================

/// Declared widget/type tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    #[serde(alias = "string", alias = "input")]
    Text,
    #[serde(alias = "textarea", alias = "multiline")]
    TextArea,
    #[serde(alias = "select")]
    Dropdown,
    Radio,
    Checkbox,
    Date,
    Year,
    #[serde(alias = "multi-text", alias = "multitext", alias = "multiValue")]
    MultiText,
    #[serde(alias = "photo", alias = "imageCapture")]
    Image,
    #[serde(alias = "videoCapture")]
    Video,
}

impl FieldType {
    /// Image and video fields hold a list of attachment references.
    pub fn is_attachment(self) -> bool {
        matches!(self, FieldType::Image | FieldType::Video)
    }

    /// Types whose value is picked from the field's option list.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            FieldType::Dropdown | FieldType::Radio | FieldType::Checkbox
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::TextArea => "textArea",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Year => "year",
            FieldType::MultiText => "multiText",
            FieldType::Image => "image",
            FieldType::Video => "video",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// InputType
// =============================================================================

/// How the text of a field is interpreted.
///
/// Unrecognized subtypes fall back to plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[serde(alias = "numeric", alias = "tel")]
    Number,
    Date,
    #[default]
    #[serde(other)]
    Text,
}

// =============================================================================
// Field
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    /// Stable external reference id. May be empty, in which case the field is
    /// identified by its `order`.
    #[serde(
        default,
        alias = "refId",
        alias = "fieldRefId",
        deserialize_with = "de::string_or_number"
    )]
    pub reference_id: String,
    #[serde(rename = "type", alias = "fieldType")]
    pub kind: FieldType,
    #[serde(default, alias = "inputSubtype")]
    pub input_type: InputType,
    #[serde(default, alias = "required", deserialize_with = "de::flexible_bool")]
    pub mandatory: bool,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub read_only: bool,
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub hidden: bool,
    #[serde(default, deserialize_with = "de::flexible_count")]
    pub min_length: Option<usize>,
    #[serde(default, deserialize_with = "de::flexible_count")]
    pub max_length: Option<usize>,
    #[serde(
        default,
        alias = "futureDateAllowed",
        deserialize_with = "de::flexible_bool"
    )]
    pub allow_future_date: bool,
    /// Raw pipe- or comma-delimited option list for choice types.
    #[serde(default)]
    pub options: String,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl Field {
    /// Declared minimum length; zero counts as undeclared.
    pub fn min_length(&self) -> Option<usize> {
        self.min_length.filter(|&n| n > 0)
    }

    /// Declared maximum length; zero counts as undeclared.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length.filter(|&n| n > 0)
    }

    /// Default value, or the empty string when absent.
    pub fn default_text(&self) -> &str {
        self.default_value.as_deref().unwrap_or("")
    }

    /// Reference id used for identity, falling back to the ordering index.
    pub fn identity(&self) -> String {
        if self.reference_id.is_empty() {
            self.order.to_string()
        } else {
            self.reference_id.clone()
        }
    }

    /// Parsed option list.
    ///
    /// `|` separates options when present anywhere in the list, otherwise `,`.
    /// Entries are trimmed and empty entries dropped.
    pub fn options(&self) -> Vec<&str> {
        let separator = if self.options.contains('|') { '|' } else { ',' };
        self.options
            .split(separator)
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .collect()
    }

    /// Whether the display name contains any of `needles`, ignoring case.
    pub fn name_contains_any(&self, needles: &[String]) -> bool {
        let name = self.name.to_lowercase();
        needles
            .iter()
            .any(|needle| name.contains(&needle.to_lowercase()))
    }
}

// =============================================================================
// Tests
// =============================================================================
