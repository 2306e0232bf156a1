//! Schema-driven form state engine
//!
//! Maps a form schema plus a stream of field edits to a validated value set:
//!
//! - [`derive_key`] gives every field a stable identity.
//! - [`initialize`] derives initial values, visible and expanded sections.
//! - [`on_field_changed`] applies section dependency rules after an edit.
//! - [`validate`] runs the rule chain over visible, non-hidden fields.
//! - [`FormSession`] bundles the above into per-interaction transactions for
//!   a widget layer and a submission sink.

pub mod dependency;
pub mod key;
pub mod session;
pub mod state;
pub mod store;
pub mod validate;
pub mod value;

pub use schemaform_schema as schema;

pub use dependency::{DependencyIndex, on_field_changed};
pub use key::{FieldKey, FieldKeyParts, KEY_SEPARATOR, derive_key, section_key};
pub use session::{
    Clock, FieldBinding, FormSession, SessionError, Submission, SubmissionSink, SubmitError,
    SubmitOutcome, Widget,
};
pub use state::{FormState, initialize};
pub use store::{ExpandedSections, ValueStore, VisibleSections};
pub use validate::{
    ValidationError, ValidationErrors, ValidationOptions, validate, validate_with,
};
pub use value::FieldValue;
