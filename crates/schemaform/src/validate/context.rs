//! Validation context
//!
//! Shared, read-only inputs of a pass (options, the reference "now") plus
//! the error map being accumulated. Validators record through a shared
//! reference, so the map sits in a `RefCell`.

use std::cell::RefCell;

use chrono::NaiveDateTime;

use crate::key::FieldKey;

use super::error::{ValidationError, ValidationErrors};
use super::options::ValidationOptions;

pub struct ValidationContext<'a> {
    pub options: &'a ValidationOptions,
    /// Reference moment for the future-date check.
    pub now: NaiveDateTime,
    errors: RefCell<ValidationErrors>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(options: &'a ValidationOptions, now: NaiveDateTime) -> Self {
        Self {
            options,
            now,
            errors: RefCell::new(ValidationErrors::new()),
        }
    }

    /// Record a failure. A later failure for the same key replaces it.
    pub fn record_error(&self, key: &FieldKey, error: ValidationError) {
        self.errors.borrow_mut().record(key.clone(), error);
    }

    pub fn finish(self) -> ValidationErrors {
        self.errors.into_inner()
    }
}
