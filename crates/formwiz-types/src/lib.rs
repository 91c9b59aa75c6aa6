//! Shared domain types for formwiz.
//!
//! This crate contains the types passed between the schema compiler, the
//! wizard state machine and the outer layers: `Schema`, `FieldDefinition`,
//! `WizardState`, collaborator records, configuration and error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, uuid, chrono,
//! thiserror.

pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod wizard;
