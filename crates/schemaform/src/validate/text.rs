//! Checks for text-valued fields (everything except attachments).

use schemaform_schema::{Field, FieldType, InputType};

use crate::key::FieldKey;
use crate::value::FieldValue;

use super::FieldValidator;
use super::context::ValidationContext;
use super::date::parse_date;
use super::error::ValidationError;

/// Runs, in order: required, max length, min length, number, date, email,
/// phone. Each failing check replaces the previous message for the field.
pub struct TextValidator<'a, 'ctx> {
    pub ctx: &'a ValidationContext<'ctx>,
    pub key: &'a FieldKey,
    pub field: &'a Field,
}

impl FieldValidator for TextValidator<'_, '_> {
    fn validate(&mut self, value: &FieldValue) {
        let text = value.as_text();
        let text = text.as_ref();
        let present = !text.is_empty();
        let name = || self.field.name.clone();

        if self.field.mandatory && text.trim().is_empty() {
            self.fail(ValidationError::Required { field: name() });
        }

        let length = text.chars().count();
        if let Some(max) = self.field.max_length()
            && present
            && length > max
        {
            self.fail(ValidationError::TooLong {
                field: name(),
                max,
                length,
            });
        }
        if let Some(min) = self.field.min_length()
            && present
            && length < min
        {
            self.fail(ValidationError::TooShort {
                field: name(),
                min,
                length,
            });
        }

        if self.field.input_type == InputType::Number && present && !is_number(text) {
            self.fail(ValidationError::InvalidNumber { field: name() });
        }

        if self.is_date() && present {
            match parse_date(text, &self.ctx.options.date_formats) {
                None => self.fail(ValidationError::InvalidDate { field: name() }),
                Some(date) if !self.field.allow_future_date && date > self.ctx.now => {
                    self.fail(ValidationError::FutureDate { field: name() })
                }
                Some(_) => {}
            }
        }

        if self.field.input_type == InputType::Text
            && present
            && text.contains('@')
            && !self.ctx.options.email_pattern.is_match(text.trim())
        {
            self.fail(ValidationError::InvalidEmail { field: name() });
        }

        if self.field.input_type == InputType::Number
            && present
            && self.field.name_contains_any(&self.ctx.options.phone_keywords)
        {
            let digits = text.chars().filter(char::is_ascii_digit).count();
            if digits != self.ctx.options.phone_digits {
                self.fail(ValidationError::InvalidPhone {
                    field: name(),
                    digits: self.ctx.options.phone_digits,
                });
            }
        }
    }
}

impl TextValidator<'_, '_> {
    fn fail(&self, error: ValidationError) {
        self.ctx.record_error(self.key, error);
    }

    fn is_date(&self) -> bool {
        self.field.input_type == InputType::Date || self.field.kind == FieldType::Date
    }
}

/// Trimmed text parses as a finite number.
fn is_number(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_number() {
        assert!(is_number("42"));
        assert!(is_number(" -3.5 "));
        assert!(is_number("1e3"));
        assert!(!is_number("12a"));
        assert!(!is_number("NaN"));
        assert!(!is_number("inf"));
        assert!(!is_number(""));
    }
}
