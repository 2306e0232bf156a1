//! Checks for image and video attachment fields.

use schemaform_schema::{Field, FieldType, SubSection};

use crate::key::FieldKey;
use crate::value::FieldValue;

use super::FieldValidator;
use super::context::ValidationContext;
use super::error::ValidationError;

/// Required-and-empty for every attachment field; image fields additionally
/// honor their subsection's capture bounds.
pub struct AttachmentValidator<'a, 'ctx> {
    pub ctx: &'a ValidationContext<'ctx>,
    pub key: &'a FieldKey,
    pub field: &'a Field,
    pub subsection: &'a SubSection,
}

impl FieldValidator for AttachmentValidator<'_, '_> {
    fn validate(&mut self, value: &FieldValue) {
        let count = value.as_list().len();

        if self.field.mandatory && count == 0 {
            self.fail(ValidationError::AttachmentRequired {
                field: self.field.name.clone(),
            });
        }

        if self.field.kind != FieldType::Image {
            return;
        }
        if let Some(min) = self.subsection.min_capture()
            && count < min
        {
            self.fail(ValidationError::TooFewAttachments {
                field: self.field.name.clone(),
                min,
                count,
            });
        }
        if let Some(max) = self.subsection.max_capture()
            && count > max
        {
            self.fail(ValidationError::TooManyAttachments {
                field: self.field.name.clone(),
                max,
                count,
            });
        }
    }
}

impl AttachmentValidator<'_, '_> {
    fn fail(&self, error: ValidationError) {
        self.ctx.record_error(self.key, error);
    }
}
