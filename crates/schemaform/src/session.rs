//! Form session
//!
//! `FormSession` is what a boundary layer holds on to: the schema of the
//! current form, its runtime state, the last validation result and the
//! submission flag. Each user interaction is one synchronous transaction
//! against it. A transaction either applies completely or, on bad input,
//! returns an error and leaves the session as it was.
//!
//! Without a schema the session is frozen: every transaction reports
//! [`SessionError::NotLoaded`].

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use schemaform_schema::{Field, HiddenFields, Schema, Section, SubSection, walk_section};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::dependency::{DependencyIndex, on_field_changed};
use crate::key::{FieldKey, derive_key, section_key};
use crate::state::{FormState, initialize};
use crate::validate::{ValidationError, ValidationErrors, ValidationOptions, validate_with};
use crate::value::FieldValue;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no schema is loaded")]
    NotLoaded,

    #[error("unknown field key '{key}'")]
    UnknownField { key: String },

    #[error("field '{key}' is read-only")]
    ReadOnlyField { key: String },

    #[error("unknown section key '{key}'")]
    UnknownSection { key: String },

    #[error("a submission is already in progress")]
    Busy,
}

/// Failure of [`FormSession::submit_to`].
#[derive(Debug, Error)]
pub enum SubmitError<E> {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("submission sink failed: {0}")]
    Sink(E),
}

// =============================================================================
// Clock
// =============================================================================

/// Source of the reference moment for future-date checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::System => Local::now().naive_local(),
            Clock::Fixed(now) => *now,
        }
    }
}

// =============================================================================
// Boundary types
// =============================================================================

/// Everything the widget layer needs to paint one field.
#[derive(Debug, Clone)]
pub struct FieldBinding<'a> {
    pub section: &'a Section,
    pub subsection: &'a SubSection,
    pub field: &'a Field,
    pub key: FieldKey,
    pub value: &'a FieldValue,
    pub error: Option<&'a ValidationError>,
    /// Whether the owning subsection is expanded.
    pub expanded: bool,
}

/// Paints a field. Value changes come back through [`FormSession::change`].
pub trait Widget {
    type Output;

    fn render(&mut self, binding: &FieldBinding<'_>) -> Self::Output;
}

/// Values of the visible sections, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    pub values: IndexMap<FieldKey, FieldValue>,
}

/// Result of asking for a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Ready(Submission),
    /// Validation failed; `first_error` is where focus should go.
    Invalid {
        first_error: FieldKey,
        error_count: usize,
    },
}

/// Receives validated submissions; owns transport and attachment encoding.
pub trait SubmissionSink {
    type Error;

    fn persist(&mut self, submission: &Submission) -> Result<(), Self::Error>;
}

// =============================================================================
// FormSession
// =============================================================================

#[derive(Debug)]
struct LoadedForm {
    schema: Schema,
    rules: DependencyIndex,
    state: FormState,
    errors: ValidationErrors,
    submitting: bool,
}

#[derive(Debug, Default)]
pub struct FormSession {
    form: Option<LoadedForm>,
    options: ValidationOptions,
    clock: Clock,
}

impl FormSession {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            form: None,
            options,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the current form. `None` leaves the session frozen.
    ///
    /// All runtime state of a previous schema is discarded.
    pub fn load(&mut self, schema: Option<Schema>) {
        self.form = schema.map(|schema| {
            let rules = DependencyIndex::from_schema(&schema);
            let state = initialize(&schema);
            info!(
                sections = schema.sections.len(),
                fields = state.values.len(),
                rules = rules.len(),
                "form loaded"
            );
            LoadedForm {
                schema,
                rules,
                state,
                errors: ValidationErrors::new(),
                submitting: false,
            }
        });
        if self.form.is_none() {
            debug!("no schema supplied; session frozen");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.form.is_some()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.form.as_ref().map(|form| &form.schema)
    }

    pub fn state(&self) -> Option<&FormState> {
        self.form.as_ref().map(|form| &form.state)
    }

    /// Errors of the last validation pass, minus fields edited since.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.form.as_ref().map(|form| &form.errors)
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.form.as_ref()?.state.values.get(key)
    }

    fn form(&self) -> Result<&LoadedForm, SessionError> {
        self.form.as_ref().ok_or(SessionError::NotLoaded)
    }

    fn form_mut(&mut self) -> Result<&mut LoadedForm, SessionError> {
        self.form.as_mut().ok_or(SessionError::NotLoaded)
    }

    // -------------------------------------------------------------------------
    // Transactions
    // -------------------------------------------------------------------------

    /// Write a field value and apply the dependency rules it triggers.
    ///
    /// Clears the stale error of the edited field and of every field in a
    /// section the change hid.
    pub fn change(
        &mut self,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), SessionError> {
        let form = self.form_mut()?;
        let field = find_field(&form.schema, key).ok_or_else(|| SessionError::UnknownField {
            key: key.to_string(),
        })?;
        if field.read_only {
            return Err(SessionError::ReadOnlyField {
                key: key.to_string(),
            });
        }

        let key = FieldKey::from_raw(key);
        let value = value.into();
        let before = form.state.visible.clone();

        let mut state = std::mem::take(&mut form.state);
        state.values.set(key.clone(), value.clone());
        form.state = on_field_changed(state, &key, &value, &form.rules, &form.schema);

        form.errors.dismiss(key.as_str());
        for hidden in before.hidden_in(&form.state.visible) {
            let Some(section) = form.schema.section(hidden) else {
                continue;
            };
            for entry in walk_section(section, HiddenFields::Include) {
                let stale = derive_key(&section.name, &entry.subsection.name, entry.field);
                form.errors.dismiss(stale.as_str());
            }
        }

        debug!(%key, "field changed");
        Ok(())
    }

    /// Expand or collapse a section (`name`) or subsection
    /// (`section::subsection`). Returns whether it is now expanded.
    pub fn toggle_expanded(&mut self, key: &str) -> Result<bool, SessionError> {
        let form = self.form_mut()?;
        let known = form.schema.sections.iter().any(|section| {
            section.name == key
                || section
                    .sub_sections
                    .iter()
                    .any(|sub| section_key(&section.name, &sub.name) == key)
        });
        if !known {
            return Err(SessionError::UnknownSection {
                key: key.to_string(),
            });
        }
        Ok(form.state.expanded.toggle(key))
    }

    /// Run a full validation pass and keep its result.
    pub fn validate(&mut self) -> Result<&ValidationErrors, SessionError> {
        let now = self.clock.now();
        let options = &self.options;
        let form = self.form.as_mut().ok_or(SessionError::NotLoaded)?;
        form.errors = validate_with(
            &form.schema,
            &form.state.values,
            &form.state.visible,
            options,
            now,
        );
        Ok(&form.errors)
    }

    /// Key of the first failing field of the last pass, in walk order.
    pub fn first_error(&self) -> Option<&FieldKey> {
        self.form.as_ref()?.errors.first_key()
    }

    // -------------------------------------------------------------------------
    // Widget boundary
    // -------------------------------------------------------------------------

    /// Bindings for every non-hidden field of the visible sections.
    pub fn bindings(&self) -> Result<Vec<FieldBinding<'_>>, SessionError> {
        let form = self.form()?;
        let state = &form.state;
        let bindings = form
            .schema
            .walk_where(|section| state.visible.contains(&section.name), HiddenFields::Skip)
            .filter_map(|entry| {
                let key = derive_key(&entry.section.name, &entry.subsection.name, entry.field);
                let value = state.values.get(key.as_str())?;
                Some(FieldBinding {
                    section: entry.section,
                    subsection: entry.subsection,
                    field: entry.field,
                    error: form.errors.get(key.as_str()),
                    expanded: state
                        .expanded
                        .contains(&section_key(&entry.section.name, &entry.subsection.name)),
                    value,
                    key,
                })
            })
            .collect();
        Ok(bindings)
    }

    /// Render every bound field with `widget`, in walk order.
    pub fn render<W: Widget>(&self, widget: &mut W) -> Result<Vec<W::Output>, SessionError> {
        Ok(self
            .bindings()?
            .iter()
            .map(|binding| widget.render(binding))
            .collect())
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    pub fn is_submitting(&self) -> bool {
        self.form.as_ref().is_some_and(|form| form.submitting)
    }

    /// Set by the caller while an asynchronous submission is pending.
    pub fn set_submitting(&mut self, submitting: bool) -> Result<(), SessionError> {
        self.form_mut()?.submitting = submitting;
        Ok(())
    }

    /// Validate and, when clean, collect the values of the visible sections.
    pub fn prepare_submission(&mut self) -> Result<SubmitOutcome, SessionError> {
        let errors = self.validate()?;
        if let Some(first_error) = errors.first_key() {
            let outcome = SubmitOutcome::Invalid {
                first_error: first_error.clone(),
                error_count: errors.len(),
            };
            debug!(?outcome, "submission blocked by validation");
            return Ok(outcome);
        }

        let form = self.form()?;
        let values = form
            .schema
            .walk_where(
                |section| form.state.visible.contains(&section.name),
                HiddenFields::Include,
            )
            .filter_map(|entry| {
                let key = derive_key(&entry.section.name, &entry.subsection.name, entry.field);
                let value = form.state.values.get(key.as_str())?.clone();
                Some((key, value))
            })
            .collect();
        Ok(SubmitOutcome::Ready(Submission { values }))
    }

    /// Validate and hand a clean submission to `sink`.
    ///
    /// The submitting flag belongs to the caller, which is expected to
    /// ignore repeat submissions while one is pending. Finding it already
    /// set here only yields [`SessionError::Busy`] as a safeguard. The flag
    /// is held for the duration of the call.
    pub fn submit_to<S: SubmissionSink>(
        &mut self,
        sink: &mut S,
    ) -> Result<SubmitOutcome, SubmitError<S::Error>> {
        if self.is_submitting() {
            return Err(SessionError::Busy.into());
        }
        let outcome = self.prepare_submission()?;
        if let SubmitOutcome::Ready(submission) = &outcome {
            self.set_submitting(true)?;
            let result = sink.persist(submission);
            self.set_submitting(false)?;
            result.map_err(SubmitError::Sink)?;
            info!(fields = submission.values.len(), "submission persisted");
        }
        Ok(outcome)
    }
}

fn find_field<'a>(schema: &'a Schema, key: &str) -> Option<&'a Field> {
    schema
        .walk()
        .find(|entry| derive_key(&entry.section.name, &entry.subsection.name, entry.field).as_str() == key)
        .map(|entry| entry.field)
}
