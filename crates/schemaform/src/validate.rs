//! Form validation
//!
//! # Architecture
//!
//! A validation pass walks the schema (visible sections only, `hidden`
//! fields skipped) and dispatches each field to a type-specific validator:
//! - `TextValidator`: every non-attachment type
//! - `AttachmentValidator`: image and video fields
//!
//! Validators record failures into a shared `ValidationContext`. Checks run
//! in a fixed order and a later failure replaces an earlier one for the same
//! field, so each failing field carries exactly one message.
//!
//! The pass never touches values or visibility; the result is rebuilt from
//! scratch every time.

mod attachment;
mod context;
mod date;
mod error;
mod options;
mod text;

pub use context::ValidationContext;
pub use error::{ValidationError, ValidationErrors};
pub use options::{
    DEFAULT_DATE_FORMATS, DEFAULT_EMAIL_PATTERN, DEFAULT_PHONE_DIGITS, DEFAULT_PHONE_KEYWORDS,
    ValidationOptions,
};

use chrono::{Local, NaiveDateTime};
use schemaform_schema::{FieldEntry, HiddenFields, Schema};
use tracing::debug;

use crate::key::derive_key;
use crate::store::{ValueStore, VisibleSections};
use crate::value::FieldValue;

use attachment::AttachmentValidator;
use text::TextValidator;

/// A validator contributes the checks of one field type.
pub trait FieldValidator {
    fn validate(&mut self, value: &FieldValue);
}

// =============================================================================
// Public API
// =============================================================================

/// Validate with default options against the current local time.
pub fn validate(
    schema: &Schema,
    values: &ValueStore,
    visible: &VisibleSections,
) -> ValidationErrors {
    validate_with(
        schema,
        values,
        visible,
        &ValidationOptions::default(),
        Local::now().naive_local(),
    )
}

/// Validate with explicit options and reference time.
///
/// Deterministic: the same inputs always give the same errors.
pub fn validate_with(
    schema: &Schema,
    values: &ValueStore,
    visible: &VisibleSections,
    options: &ValidationOptions,
    now: NaiveDateTime,
) -> ValidationErrors {
    let ctx = ValidationContext::new(options, now);
    let mut checked = 0usize;

    for entry in schema.walk_where(|section| visible.contains(&section.name), HiddenFields::Skip) {
        validate_field(&ctx, values, entry);
        checked += 1;
    }

    let errors = ctx.finish();
    debug!(checked, failed = errors.len(), "validation pass finished");
    errors
}

fn validate_field(ctx: &ValidationContext<'_>, values: &ValueStore, entry: FieldEntry<'_>) {
    let key = derive_key(&entry.section.name, &entry.subsection.name, entry.field);
    let empty = FieldValue::empty();
    let value = values.get(key.as_str()).unwrap_or(&empty);

    if entry.field.kind.is_attachment() {
        AttachmentValidator {
            ctx,
            key: &key,
            field: entry.field,
            subsection: entry.subsection,
        }
        .validate(value);
    } else {
        TextValidator {
            ctx,
            key: &key,
            field: entry.field,
        }
        .validate(value);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::FieldKey;
    use crate::state::initialize;
    use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone};
    use serde_json::{Value, json};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    /// One section `A` / subsection `S` holding the given fields.
    fn single(fields: Value) -> Schema {
        single_with(json!({}), fields)
    }

    fn single_with(subsection: Value, fields: Value) -> Schema {
        let mut sub = json!({ "name": "S", "fields": fields });
        if let (Some(sub), Some(extra)) = (sub.as_object_mut(), subsection.as_object()) {
            sub.extend(extra.clone());
        }
        Schema::from_json_value(json!({
            "sections": [ { "name": "A", "subSections": [ sub ] } ]
        }))
        .unwrap()
    }

    fn run(schema: &Schema, key: &str, value: FieldValue) -> ValidationErrors {
        let mut state = initialize(schema);
        state.values.set(FieldKey::from_raw(key), value);
        validate_with(
            schema,
            &state.values,
            &state.visible,
            &ValidationOptions::default(),
            now(),
        )
    }

    #[test]
    fn test_required_empty_and_whitespace() {
        let schema = single(json!([
            { "name": "Owner", "referenceId": "o", "type": "text", "mandatory": true }
        ]));
        for value in ["", "   "] {
            let errors = run(&schema, "A::S::Owner::o", value.into());
            assert_eq!(
                errors.get("A::S::Owner::o"),
                Some(&ValidationError::Required {
                    field: "Owner".to_string()
                })
            );
            assert_eq!(
                errors.message("A::S::Owner::o").unwrap(),
                "Owner is required"
            );
        }
        assert!(run(&schema, "A::S::Owner::o", "Ann".into()).is_valid());
    }

    #[test]
    fn test_length_bounds() {
        let schema = single(json!([
            { "name": "Code", "referenceId": "c", "type": "text", "minLength": 4, "maxLength": 5 }
        ]));
        let errors = run(&schema, "A::S::Code::c", "abcdef".into());
        assert!(matches!(
            errors.get("A::S::Code::c"),
            Some(ValidationError::TooLong { max: 5, length: 6, .. })
        ));

        let errors = run(&schema, "A::S::Code::c", "abc".into());
        assert!(matches!(
            errors.get("A::S::Code::c"),
            Some(ValidationError::TooShort { min: 4, length: 3, .. })
        ));

        // Optional and empty: no length checks.
        assert!(run(&schema, "A::S::Code::c", "".into()).is_valid());
    }

    #[test]
    fn test_numeric_subtype() {
        let schema = single(json!([
            { "name": "Age", "referenceId": "a", "type": "text", "inputType": "number" }
        ]));
        let errors = run(&schema, "A::S::Age::a", "twelve".into());
        assert_eq!(
            errors.message("A::S::Age::a").unwrap(),
            "Age must be a valid number"
        );
        assert!(run(&schema, "A::S::Age::a", "12".into()).is_valid());
    }

    #[test]
    fn test_date_subtype() {
        let schema = single(json!([
            { "name": "Born", "referenceId": "b", "type": "date", "inputType": "date" },
            { "name": "Visit", "referenceId": "v", "type": "date", "allowFutureDate": true }
        ]));
        let errors = run(&schema, "A::S::Born::b", "31/02/2020".into());
        assert!(matches!(
            errors.get("A::S::Born::b"),
            Some(ValidationError::InvalidDate { .. })
        ));

        let errors = run(&schema, "A::S::Born::b", "2024-06-16".into());
        assert!(matches!(
            errors.get("A::S::Born::b"),
            Some(ValidationError::FutureDate { .. })
        ));

        // The reference day itself is not in the future.
        assert!(run(&schema, "A::S::Born::b", "2024-06-15".into()).is_valid());
        assert!(run(&schema, "A::S::Visit::v", "2030-01-01".into()).is_valid());
    }

    /// `now()` shifted by `minutes`, written as RFC 3339 at a +05:30 offset.
    fn offset_timestamp(minutes: i64) -> String {
        let local = Local
            .from_local_datetime(&(now() + TimeDelta::minutes(minutes)))
            .earliest()
            .unwrap();
        local
            .with_timezone(&FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
            .to_rfc3339()
    }

    #[test]
    fn test_offset_timestamp_against_now() {
        let schema = single(json!([
            { "name": "Born", "referenceId": "b", "type": "date" }
        ]));

        let errors = run(&schema, "A::S::Born::b", offset_timestamp(90).into());
        assert_eq!(
            errors.message("A::S::Born::b").unwrap(),
            "Born cannot be a future date"
        );

        assert!(run(&schema, "A::S::Born::b", offset_timestamp(-90).into()).is_valid());
        assert!(run(&schema, "A::S::Born::b", offset_timestamp(-1).into()).is_valid());
    }

    #[test]
    fn test_unknown_input_type_validates_as_text() {
        let schema = single(json!([
            { "name": "Contact", "referenceId": "c", "type": "text", "inputType": "email" }
        ]));
        // Plain-text rules apply: the email heuristic, but no number check.
        let errors = run(&schema, "A::S::Contact::c", "ann@example".into());
        assert!(matches!(
            errors.get("A::S::Contact::c"),
            Some(ValidationError::InvalidEmail { .. })
        ));
        assert!(run(&schema, "A::S::Contact::c", "ann@example.org".into()).is_valid());
        assert!(run(&schema, "A::S::Contact::c", "call me".into()).is_valid());
    }

    #[test]
    fn test_attachment_counts() {
        let schema = single_with(
            json!({ "minCapture": 2, "maxCapture": 2 }),
            json!([{ "name": "Photos", "referenceId": "p", "type": "image", "mandatory": true }]),
        );

        let errors = run(&schema, "A::S::Photos::p", vec!["one"].into());
        assert!(matches!(
            errors.get("A::S::Photos::p"),
            Some(ValidationError::TooFewAttachments { min: 2, count: 1, .. })
        ));

        let errors = run(&schema, "A::S::Photos::p", vec!["1", "2", "3"].into());
        assert!(matches!(
            errors.get("A::S::Photos::p"),
            Some(ValidationError::TooManyAttachments { max: 2, count: 3, .. })
        ));

        assert!(run(&schema, "A::S::Photos::p", vec!["1", "2"].into()).is_valid());
    }

    #[test]
    fn test_attachment_empty_mandatory_last_rule_wins() {
        let schema = single_with(
            json!({ "minCapture": 1 }),
            json!([{ "name": "Photos", "referenceId": "p", "type": "image", "mandatory": true }]),
        );
        let errors = run(&schema, "A::S::Photos::p", FieldValue::empty());
        // Required fires first; the minimum-count check overwrites it.
        assert!(matches!(
            errors.get("A::S::Photos::p"),
            Some(ValidationError::TooFewAttachments { min: 1, count: 0, .. })
        ));
    }

    #[test]
    fn test_single_attachment_value_is_coerced() {
        let schema = single_with(
            json!({ "minCapture": 1, "maxCapture": 1 }),
            json!([{ "name": "Photo", "referenceId": "p", "type": "image", "mandatory": true }]),
        );
        assert!(run(&schema, "A::S::Photo::p", "img-ref".into()).is_valid());
    }

    #[test]
    fn test_video_ignores_capture_bounds() {
        let schema = single_with(
            json!({ "minCapture": 2, "maxCapture": 2 }),
            json!([{ "name": "Clip", "referenceId": "v", "type": "video", "mandatory": true }]),
        );
        assert!(run(&schema, "A::S::Clip::v", vec!["c1"].into()).is_valid());
        let errors = run(&schema, "A::S::Clip::v", FieldValue::empty());
        assert!(matches!(
            errors.get("A::S::Clip::v"),
            Some(ValidationError::AttachmentRequired { .. })
        ));
    }

    #[test]
    fn test_email_heuristic() {
        let schema = single(json!([
            { "name": "Contact", "referenceId": "e", "type": "text" }
        ]));
        let errors = run(&schema, "A::S::Contact::e", "ann@".into());
        assert!(matches!(
            errors.get("A::S::Contact::e"),
            Some(ValidationError::InvalidEmail { .. })
        ));
        assert!(run(&schema, "A::S::Contact::e", "ann@example.org".into()).is_valid());
        // No "@": not treated as an email.
        assert!(run(&schema, "A::S::Contact::e", "ann".into()).is_valid());
    }

    #[test]
    fn test_phone_heuristic() {
        let schema = single(json!([
            { "name": "Mobile Number", "referenceId": "m", "type": "text", "inputType": "number" }
        ]));
        let errors = run(&schema, "A::S::Mobile Number::m", "12345".into());
        assert_eq!(
            errors.message("A::S::Mobile Number::m").unwrap(),
            "Mobile Number must be a 10-digit phone number"
        );
        assert!(run(&schema, "A::S::Mobile Number::m", "9876543210".into()).is_valid());
    }

    #[test]
    fn test_hidden_fields_and_sections_skipped() {
        let schema = Schema::from_json_value(json!({
            "sections": [
                { "name": "A", "subSections": [ { "name": "S", "fields": [
                    { "name": "Secret", "referenceId": "s", "type": "text", "mandatory": true, "hidden": true }
                ] } ] },
                { "name": "B", "subSections": [ { "name": "S", "fields": [
                    { "name": "Later", "referenceId": "l", "type": "text", "mandatory": true }
                ] } ] }
            ]
        }))
        .unwrap();
        let mut state = initialize(&schema);
        let errors = validate_with(
            &schema,
            &state.values,
            &state.visible,
            &ValidationOptions::default(),
            now(),
        );
        assert_eq!(errors.keys().map(FieldKey::as_str).collect::<Vec<_>>(), vec!["B::S::Later::l"]);

        state.visible.remove("B");
        let errors = validate_with(
            &schema,
            &state.values,
            &state.visible,
            &ValidationOptions::default(),
            now(),
        );
        assert!(errors.is_valid());
    }

    #[test]
    fn test_first_error_follows_walk_order() {
        let schema = single(json!([
            { "name": "Second", "referenceId": "2", "type": "text", "mandatory": true, "order": 2 },
            { "name": "First", "referenceId": "1", "type": "text", "mandatory": true, "order": 1 }
        ]));
        let state = initialize(&schema);
        let errors = validate_with(
            &schema,
            &state.values,
            &state.visible,
            &ValidationOptions::default(),
            now(),
        );
        assert_eq!(errors.first_key().unwrap().as_str(), "A::S::First::1");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_is_deterministic() {
        let schema = single(json!([
            { "name": "Born", "referenceId": "b", "type": "date", "mandatory": true },
            { "name": "Phone", "referenceId": "p", "type": "text", "inputType": "number", "defaultValue": "12" }
        ]));
        let state = initialize(&schema);
        let options = ValidationOptions::default();
        let first = validate_with(&schema, &state.values, &state.visible, &options, now());
        let second = validate_with(&schema, &state.values, &state.visible, &options, now());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_custom_options() {
        let schema = single(json!([
            { "name": "Landline", "referenceId": "l", "type": "text", "inputType": "number" }
        ]));
        let mut options = ValidationOptions::default();
        options.phone_keywords = vec!["landline".to_string()];
        options.phone_digits = 7;
        let mut state = initialize(&schema);
        state
            .values
            .set(FieldKey::from_raw("A::S::Landline::l"), "5551234".into());

        let errors = validate_with(&schema, &state.values, &state.visible, &options, now());
        assert!(errors.is_valid());
    }
}
