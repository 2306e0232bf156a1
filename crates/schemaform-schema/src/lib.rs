//! Form schema model
//!
//! A form is described by a JSON document of sections, subsections and
//! fields, plus dependency rules that toggle section visibility. This crate
//! holds the read-only model and the ordered walk over it; the `schemaform`
//! crate builds runtime state on top.

mod de;
mod dependency;
mod document;
mod error;
mod field;
mod section;
mod walk;

pub use dependency::DependencyRule;
pub use document::Schema;
pub use error::SchemaError;
pub use field::{Field, FieldType, InputType};
pub use section::{Section, SubSection};
pub use walk::{FieldEntry, HiddenFields, walk_section};
