//! Compile spreadsheet header rows into a `Schema`.
//!
//! Expected layout, one field per column (column 0 holds row labels and is
//! ignored):
//!
//! | row | content                                   |
//! |-----|-------------------------------------------|
//! | 0   | section name                              |
//! | 1   | question text                             |
//! | 2   | placeholder                               |
//! | 3   | `обязательно` when required, else anything |
//!
//! The sheet is edited by hand, so partially filled columns are skipped
//! rather than rejected. The only hard failure is a table with fewer than
//! four rows.

use formwiz_types::error::SchemaError;
use formwiz_types::schema::{FieldDefinition, Schema};
use serde::Serialize;
use tracing::debug;

use crate::csv::{parse_csv, Row};
use crate::schema::classify::classify_question;

/// Number of header rows the compiler reads.
pub const MIN_SCHEMA_ROWS: usize = 4;

/// Required-status text marking a field as required.
pub const REQUIRED_MARKER: &str = "обязательно";

/// Placeholder cells that mean "no placeholder" when they are the whole cell.
const NO_PLACEHOLDER_VALUES: &[&str] = &["-", "—", "нет", "none", "n/a"];

/// Phrases that mean "no placeholder" anywhere in the cell.
const NO_PLACEHOLDER_PHRASES: &[&str] = &[
    "не нужен",
    "не нужно",
    "не требуется",
    "без плейсхолдера",
    "no placeholder",
];

/// Why a column produced no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Neither a section nor a question.
    Blank,
    MissingQuestion,
    MissingSection,
}

/// A column that was left out of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedColumn {
    /// 0-based column index in the source table.
    pub column: usize,
    pub reason: SkipReason,
}

/// A compiled schema together with the columns that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaCompilation {
    pub schema: Schema,
    pub skipped_columns: Vec<SkippedColumn>,
}

/// Compile parsed rows into a schema.
pub fn compile_schema(rows: &[Row]) -> Result<Schema, SchemaError> {
    compile_schema_report(rows).map(|c| c.schema)
}

/// Tokenize CSV text and compile it.
pub fn compile_schema_csv(text: &str) -> Result<SchemaCompilation, SchemaError> {
    compile_schema_report(&parse_csv(text))
}

/// Compile parsed rows, also reporting the skipped columns.
pub fn compile_schema_report(rows: &[Row]) -> Result<SchemaCompilation, SchemaError> {
    if rows.len() < MIN_SCHEMA_ROWS {
        return Err(SchemaError::Malformed { rows: rows.len() });
    }

    let header = &rows[..MIN_SCHEMA_ROWS];
    let column_count = header.iter().map(Vec::len).max().unwrap_or(0);

    let mut fields = Vec::new();
    let mut skipped_columns = Vec::new();

    for column in 1..column_count {
        let section = cell(&header[0], column);
        let question = cell(&header[1], column);

        let reason = match (section.is_empty(), question.is_empty()) {
            (false, false) => None,
            (true, true) => Some(SkipReason::Blank),
            (false, true) => Some(SkipReason::MissingQuestion),
            (true, false) => Some(SkipReason::MissingSection),
        };
        if let Some(reason) = reason {
            debug!(column, ?reason, "Skipping schema column");
            skipped_columns.push(SkippedColumn { column, reason });
            continue;
        }

        let shape = classify_question(question);
        fields.push(FieldDefinition {
            section: section.to_string(),
            question: question.to_string(),
            placeholder: normalize_placeholder(cell(&header[2], column)),
            required: is_required_marker(cell(&header[3], column)),
            field_type: shape.field_type,
            accept: shape.accept,
            max_length: shape.max_length,
            rows: shape.rows,
        });
    }

    let schema = Schema::from_fields(fields);
    debug!(
        sections = schema.section_count(),
        fields = schema.fields().len(),
        skipped = skipped_columns.len(),
        "Compiled form schema"
    );

    Ok(SchemaCompilation {
        schema,
        skipped_columns,
    })
}

/// Whether a required-status cell marks the field as required.
pub fn is_required_marker(raw: &str) -> bool {
    raw.trim().to_lowercase() == REQUIRED_MARKER
}

/// Clear placeholders that say no placeholder is needed.
pub fn normalize_placeholder(raw: &str) -> String {
    let raw = raw.trim();
    let lowered = raw.to_lowercase();
    let suppressed = NO_PLACEHOLDER_VALUES.contains(&lowered.as_str())
        || NO_PLACEHOLDER_PHRASES.iter().any(|p| lowered.contains(p));
    if suppressed {
        String::new()
    } else {
        raw.to_string()
    }
}

fn cell(row: &Row, column: usize) -> &str {
    row.get(column).map(|c| c.trim()).unwrap_or("")
}
