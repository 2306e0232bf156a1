//! Field values
//!
//! Free-text, choice, date and year fields hold text; attachment and
//! multi-value fields may hold a list. Readers coerce between the two shapes
//! instead of failing on a mismatch.

use std::borrow::Cow;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "JsonValue")]
pub enum FieldValue {
    Text(String),
    /// Attachment references or multi-value entries.
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Text view of the value; lists are joined with `,`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text),
            FieldValue::List(items) => Cow::Owned(items.join(",")),
        }
    }

    /// List view of the value.
    ///
    /// A non-blank text counts as a one-element list. Blank entries are
    /// not attachments and are skipped.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(text) if text.trim().is_empty() => Vec::new(),
            FieldValue::Text(text) => vec![text.as_str()],
            FieldValue::List(items) => items
                .iter()
                .map(String::as_str)
                .filter(|item| !item.trim().is_empty())
                .collect(),
        }
    }

    /// Blank text or an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(_) => self.as_list().is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Lenient conversion from JSON: scalars become text, arrays become lists,
/// `null` becomes the empty string.
impl From<JsonValue> for FieldValue {
    fn from(value: JsonValue) -> Self {
        fn scalar(value: JsonValue) -> String {
            match value {
                JsonValue::Null => String::new(),
                JsonValue::String(s) => s,
                other => other.to_string(),
            }
        }

        match value {
            JsonValue::Array(items) => FieldValue::List(items.into_iter().map(scalar).collect()),
            other => FieldValue::Text(scalar(other)),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::List(items) => items.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_text_coerces_to_one_element_list() {
        let value = FieldValue::from("img-1");
        assert_eq!(value.as_list(), vec!["img-1"]);
        assert!(FieldValue::from("  ").as_list().is_empty());
    }

    #[test]
    fn test_list_as_text() {
        let value = FieldValue::from(vec!["a", "b"]);
        assert_eq!(value.as_text(), "a,b");
    }

    #[test]
    fn test_blank() {
        assert!(FieldValue::empty().is_blank());
        assert!(FieldValue::from(" \t").is_blank());
        assert!(FieldValue::from(vec![""]).is_blank());
        assert!(!FieldValue::from(vec!["x"]).is_blank());
    }

    #[test]
    fn test_deserialize_lenient() {
        let value: FieldValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(value, FieldValue::from("42"));
        let value: FieldValue = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(value, FieldValue::empty());
        let value: FieldValue = serde_json::from_value(json!(["a", 1])).unwrap();
        assert_eq!(value, FieldValue::from(vec!["a", "1"]));
    }

    #[test]
    fn test_serialize_untagged() {
        assert_eq!(serde_json::to_value(FieldValue::from("x")).unwrap(), json!("x"));
        assert_eq!(
            serde_json::to_value(FieldValue::from(vec!["x"])).unwrap(),
            json!(["x"])
        );
    }
}
