//! Spreadsheet-driven form schema.
//!
//! Compiles the four header rows of the exported sheet into a `Schema`,
//! infers field types from question text, and loads schemas from a
//! `SchemaSource` with fallback to a built-in default.

pub mod classify;
pub mod compiler;
pub mod defaults;
pub mod source;

pub use compiler::{compile_schema, compile_schema_csv, compile_schema_report};
pub use defaults::default_schema;
pub use source::{load_schema, LoadedSchema, SchemaOrigin, SchemaSource};
