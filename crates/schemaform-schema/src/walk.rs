//! Section/field tree walker
//!
//! Every engine pass visits fields the same way: sections in list order,
//! subsections in list order, fields by ascending `order` (stable on ties).
//! The walk is lazy; filters are applied per section and per field.

use crate::document::Schema;
use crate::field::Field;
use crate::section::{Section, SubSection};

/// One visited field together with its owning section and subsection.
#[derive(Debug, Clone, Copy)]
pub struct FieldEntry<'a> {
    pub section: &'a Section,
    pub subsection: &'a SubSection,
    pub field: &'a Field,
}

/// Whether fields flagged `hidden` are yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HiddenFields {
    #[default]
    Include,
    Skip,
}

impl HiddenFields {
    fn admits(self, field: &Field) -> bool {
        match self {
            HiddenFields::Include => true,
            HiddenFields::Skip => !field.hidden,
        }
    }
}

impl Schema {
    /// Walk every field of the schema.
    pub fn walk(&self) -> impl Iterator<Item = FieldEntry<'_>> + '_ {
        self.walk_where(|_| true, HiddenFields::Include)
    }

    /// Walk the fields of sections accepted by `section_filter`.
    pub fn walk_where<'a, P>(
        &'a self,
        mut section_filter: P,
        hidden: HiddenFields,
    ) -> impl Iterator<Item = FieldEntry<'a>> + 'a
    where
        P: FnMut(&Section) -> bool + 'a,
    {
        self.sections
            .iter()
            .filter(move |section| section_filter(section))
            .flat_map(move |section| walk_section(section, hidden))
    }
}

/// Walk the fields of a single section.
pub fn walk_section(section: &Section, hidden: HiddenFields) -> impl Iterator<Item = FieldEntry<'_>> {
    section.sub_sections.iter().flat_map(move |subsection| {
        subsection
            .fields_in_order()
            .into_iter()
            .filter(move |field| hidden.admits(field))
            .map(move |field| FieldEntry {
                section,
                subsection,
                field,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::from_json_value(json!({
            "sections": [
                { "name": "Second", "order": 2, "subSections": [
                    { "name": "S1", "fields": [
                        { "name": "b", "type": "text", "order": 2 },
                        { "name": "a", "type": "text", "order": 1, "hidden": true }
                    ] },
                    { "name": "S2", "fields": [
                        { "name": "c", "type": "date" }
                    ] }
                ] },
                { "name": "First", "order": 1, "subSections": [
                    { "name": "S1", "fields": [
                        { "name": "d", "type": "image" }
                    ] }
                ] }
            ]
        }))
        .unwrap()
    }

    fn names<'a>(entries: impl Iterator<Item = FieldEntry<'a>>) -> Vec<String> {
        entries
            .map(|e| format!("{}/{}/{}", e.section.name, e.subsection.name, e.field.name))
            .collect()
    }

    #[test]
    fn test_walk_uses_list_order_for_sections() {
        let schema = schema();
        assert_eq!(
            names(schema.walk()),
            vec!["Second/S1/a", "Second/S1/b", "Second/S2/c", "First/S1/d"]
        );
    }

    #[test]
    fn test_walk_skips_hidden_and_filtered_sections() {
        let schema = schema();
        let entries = schema.walk_where(|section| section.name != "First", HiddenFields::Skip);
        assert_eq!(names(entries), vec!["Second/S1/b", "Second/S2/c"]);
    }

    #[test]
    fn test_walk_is_repeatable() {
        let schema = schema();
        assert_eq!(names(schema.walk()), names(schema.walk()));
    }
}
