//! Infrastructure layer for formwiz.
//!
//! Contains implementations of the source traits defined in `formwiz-core`:
//! the spreadsheet CSV export over HTTP, local CSV files, and the
//! collaborator's record endpoints. Also loads `config.toml`.

pub mod config;
pub mod source;
