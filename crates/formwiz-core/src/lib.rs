//! Form schema compilation and wizard navigation for formwiz.
//!
//! This crate turns an exported spreadsheet into a `Schema` and drives the
//! multi-step wizard over it. It also defines the source traits ("ports") the
//! infrastructure layer implements. It depends only on `formwiz-types` --
//! never on `formwiz-infra` or any HTTP crate.

pub mod csv;
pub mod field_key;
pub mod schema;
pub mod scoring;
pub mod wizard;
