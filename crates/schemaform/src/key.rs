//! Field identity
//!
//! A `FieldKey` joins section name, subsection name, field name and the
//! field's reference id (or ordering index when the id is empty) with
//! [`KEY_SEPARATOR`]. The dependency resolver splits keys back into their
//! parts, so the format is part of the engine's contract.
//!
//! Schema authors are assumed not to use the separator inside names or
//! reference ids; this is not enforced.

use core::fmt;
use std::borrow::Borrow;

use schemaform_schema::Field;
use serde::{Deserialize, Serialize};

pub const KEY_SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

/// The four components of a [`FieldKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeyParts<'a> {
    pub section: &'a str,
    pub subsection: &'a str,
    pub field: &'a str,
    /// Reference id, or the ordering index when the id was empty.
    pub identity: &'a str,
}

/// Derive the key of `field` inside `section` / `subsection`.
pub fn derive_key(section: &str, subsection: &str, field: &Field) -> FieldKey {
    FieldKey(
        [section, subsection, field.name.as_str(), field.identity().as_str()].join(KEY_SEPARATOR),
    )
}

/// Composite key of a subsection in the expanded-section set.
pub fn section_key(section: &str, subsection: &str) -> String {
    format!("{section}{KEY_SEPARATOR}{subsection}")
}

impl FieldKey {
    /// Wrap an existing key string, e.g. one received back from a widget.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        FieldKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key into its components.
    ///
    /// Returns `None` when the key does not have exactly four parts.
    pub fn parts(&self) -> Option<FieldKeyParts<'_>> {
        let mut parts = self.0.split(KEY_SEPARATOR);
        let section = parts.next()?;
        let subsection = parts.next()?;
        let field = parts.next()?;
        let identity = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(FieldKeyParts {
            section,
            subsection,
            field,
            identity,
        })
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
