//! Validation error types
//!
//! `ValidationError` is a per-field failure; its `Display` is the message
//! shown next to the field. `ValidationErrors` is the result of one full
//! validation pass, ordered by walk order.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use thisisplural::Plural;

use crate::key::FieldKey;

// =============================================================================
// ValidationError
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters (got {length})")]
    TooLong {
        field: String,
        max: usize,
        length: usize,
    },

    #[error("{field} must be at least {min} characters (got {length})")]
    TooShort {
        field: String,
        min: usize,
        length: usize,
    },

    #[error("{field} must be a valid number")]
    InvalidNumber { field: String },

    #[error("{field} must be a valid date")]
    InvalidDate { field: String },

    #[error("{field} cannot be a future date")]
    FutureDate { field: String },

    #[error("{field} requires at least one attachment")]
    AttachmentRequired { field: String },

    #[error("{field} requires at least {min} attachments (got {count})")]
    TooFewAttachments {
        field: String,
        min: usize,
        count: usize,
    },

    #[error("{field} allows at most {max} attachments (got {count})")]
    TooManyAttachments {
        field: String,
        max: usize,
        count: usize,
    },

    #[error("{field} must be a valid email address")]
    InvalidEmail { field: String },

    #[error("{field} must be a {digits}-digit phone number")]
    InvalidPhone { field: String, digits: usize },
}

impl ValidationError {
    /// Display name of the failing field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidNumber { field }
            | ValidationError::InvalidDate { field }
            | ValidationError::FutureDate { field }
            | ValidationError::AttachmentRequired { field }
            | ValidationError::TooFewAttachments { field, .. }
            | ValidationError::TooManyAttachments { field, .. }
            | ValidationError::InvalidEmail { field }
            | ValidationError::InvalidPhone { field, .. } => field,
        }
    }
}

// =============================================================================
// ValidationErrors
// =============================================================================

/// Failing fields of one validation pass, in walk order.
///
/// Empty means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct ValidationErrors(IndexMap<FieldKey, ValidationError>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Message for `key`, if it failed.
    pub fn message(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    /// The first failing field in walk order.
    pub fn first(&self) -> Option<(&FieldKey, &ValidationError)> {
        self.0.first()
    }

    pub fn first_key(&self) -> Option<&FieldKey> {
        self.first().map(|(key, _)| key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.0.keys()
    }

    /// Record a failure, replacing an earlier one for the same field.
    pub(crate) fn record(&mut self, key: FieldKey, error: ValidationError) {
        self.0.insert(key, error);
    }

    /// Drop a stale entry after its field was edited.
    pub(crate) fn dismiss(&mut self, key: &str) -> Option<ValidationError> {
        self.0.shift_remove(key)
    }
}

/// Serialized as `{ key: message }`.
impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, error) in &self.0 {
            map.serialize_entry(key, &error.to_string())?;
        }
        map.end()
    }
}
