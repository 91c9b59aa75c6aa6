//! Compiled form schema types.
//!
//! A `Schema` is the full compiled form definition for one spreadsheet
//! snapshot: the ordered list of sections (one wizard step each) and the
//! ordered list of field definitions. It is immutable once built.

use serde::Serialize;

use std::fmt;

/// Input kind of a form field, inferred from the question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Tel,
    File,
}

impl FieldType {
    /// Whether values of this type carry a format check of their own.
    pub fn has_format_validation(&self) -> bool {
        matches!(self, FieldType::Email | FieldType::Tel)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Textarea => write!(f, "textarea"),
            FieldType::Email => write!(f, "email"),
            FieldType::Tel => write!(f, "tel"),
            FieldType::File => write!(f, "file"),
        }
    }
}

/// Compiled description of one question.
///
/// Serialized in camelCase because the UI layer consumes it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Section (wizard step) the field belongs to.
    pub section: String,
    /// Question text shown as the field label.
    pub question: String,
    /// Placeholder text; empty when the sheet says none is needed.
    pub placeholder: String,
    pub required: bool,
    pub field_type: FieldType,
    /// File-picker filter, e.g. ".pdf,.doc,.docx". Only set for file fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Visible rows for textarea fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

impl FieldDefinition {
    /// Whether the field must be valid before the wizard leaves its step.
    ///
    /// Required fields gate navigation, and so do email/tel fields regardless
    /// of the required flag, because their format check must still pass.
    pub fn is_gating(&self) -> bool {
        self.required || self.field_type.has_format_validation()
    }
}

/// Full compiled form definition.
///
/// Sections are unique and ordered by first occurrence; every field's section
/// is guaranteed to be in the section list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Schema {
    sections: Vec<String>,
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// Build a schema from fields, deriving the section list from the fields'
    /// sections in first-occurrence order.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Self {
        let mut sections: Vec<String> = Vec::new();
        for field in &fields {
            if !sections.iter().any(|s| s == &field.section) {
                sections.push(field.section.clone());
            }
        }
        Self { sections, fields }
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Section name for a 1-based step number.
    pub fn section_for_step(&self, step: usize) -> Option<&str> {
        step.checked_sub(1)
            .and_then(|idx| self.sections.get(idx))
            .map(String::as_str)
    }
}
