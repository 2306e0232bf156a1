//! Runtime collections: the value store and the section sets.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thisisplural::Plural;

use crate::key::FieldKey;
use crate::value::FieldValue;

// =============================================================================
// ValueStore
// =============================================================================

/// Current value of every field, keyed by [`FieldKey`].
///
/// Entries are created at initialization and afterwards only overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
#[serde(transparent)]
pub struct ValueStore(IndexMap<FieldKey, FieldValue>);

impl ValueStore {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Write a value, returning the previous one.
    pub fn set(&mut self, key: FieldKey, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(key, value)
    }

    /// Reset an existing entry to the empty string. Unknown keys are ignored.
    pub fn clear(&mut self, key: &str) {
        if let Some(value) = self.0.get_mut(key) {
            *value = FieldValue::empty();
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.0.keys()
    }
}

// =============================================================================
// Section sets
// =============================================================================

/// Names of the sections currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleSections(IndexSet<String>);

/// Section names and `section::subsection` keys currently expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedSections(IndexSet<String>);

macro_rules! section_set {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn contains(&self, name: &str) -> bool {
                self.0.contains(name)
            }

            /// Returns `true` if the name was not present.
            pub fn insert(&mut self, name: impl Into<String>) -> bool {
                self.0.insert(name.into())
            }

            /// Returns `true` if the name was present.
            pub fn remove(&mut self, name: &str) -> bool {
                self.0.shift_remove(name)
            }

            pub fn iter(&self) -> impl Iterator<Item = &str> {
                self.0.iter().map(String::as_str)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl<S: Into<String>> FromIterator<S> for $name {
            fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
                Self(iter.into_iter().map(Into::into).collect())
            }
        }
    };
}

section_set!(VisibleSections);
section_set!(ExpandedSections);

impl VisibleSections {
    /// Sections visible here but not in `after`.
    pub fn hidden_in<'a>(&'a self, after: &'a VisibleSections) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |name| !after.contains(name))
    }
}

impl ExpandedSections {
    /// Flip a key, returning whether it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.remove(key) {
            false
        } else {
            self.insert(key)
        }
    }
}
