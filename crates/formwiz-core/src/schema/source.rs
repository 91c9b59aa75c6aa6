//! Schema source trait and the load-with-fallback policy.
//!
//! A failed fetch or a malformed sheet must never leave the applicant with a
//! broken form: `load_schema` substitutes the built-in default schema and
//! reports why.

use std::future::Future;

use formwiz_types::error::SourceError;
use formwiz_types::schema::Schema;
use serde::Serialize;
use tracing::{info, warn};

use crate::field_key::find_key_collisions;
use crate::schema::compiler::{compile_schema_csv, SkippedColumn};
use crate::schema::defaults::default_schema;

// ---------------------------------------------------------------------------
// SchemaSource trait (RPITIT)
// ---------------------------------------------------------------------------

/// Where the raw schema CSV comes from (spreadsheet export, local file, ...).
pub trait SchemaSource: Send + Sync {
    /// Fetch the raw CSV text.
    fn fetch_csv(&self) -> impl Future<Output = Result<String, SourceError>> + Send;

    /// Human-readable description for logs and CLI output.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Where a loaded schema came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaOrigin {
    /// Compiled from the source.
    Source { description: String },
    /// The built-in default, because the source failed.
    Fallback { reason: String },
}

/// A schema ready for the wizard, with provenance.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedSchema {
    pub schema: Schema,
    pub origin: SchemaOrigin,
    pub skipped_columns: Vec<SkippedColumn>,
}

impl LoadedSchema {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SchemaOrigin::Fallback { .. })
    }
}

/// Fetch and compile a schema, falling back to the default schema on any
/// fetch or structural failure.
pub async fn load_schema<S: SchemaSource>(source: &S) -> LoadedSchema {
    let description = source.describe();

    let text = match source.fetch_csv().await {
        Ok(text) => text,
        Err(e) => {
            warn!(source = %description, error = %e, "Schema fetch failed, using default schema");
            return fallback(format!("fetch failed: {e}"));
        }
    };

    let compilation = match compile_schema_csv(&text) {
        Ok(compilation) => compilation,
        Err(e) => {
            warn!(
                source = %description,
                error = %e,
                "Schema compilation failed, using default schema"
            );
            return fallback(e.to_string());
        }
    };

    for collision in find_key_collisions(&compilation.schema) {
        warn!(
            key = %collision.key,
            questions = ?collision.questions,
            "Field key is shared or empty"
        );
    }

    info!(
        source = %description,
        sections = compilation.schema.section_count(),
        fields = compilation.schema.fields().len(),
        skipped = compilation.skipped_columns.len(),
        "Loaded form schema"
    );

    LoadedSchema {
        schema: compilation.schema,
        origin: SchemaOrigin::Source { description },
        skipped_columns: compilation.skipped_columns,
    }
}

fn fallback(reason: String) -> LoadedSchema {
    LoadedSchema {
        schema: default_schema(),
        origin: SchemaOrigin::Fallback { reason },
        skipped_columns: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Result<&'static str, &'static str>);

    impl SchemaSource for StaticSource {
        async fn fetch_csv(&self) -> Result<String, SourceError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(ct) => Err(SourceError::UnexpectedContentType(ct.to_string())),
            }
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[tokio::test]
    async fn test_load_schema_compiles_source() {
        let source = StaticSource(Ok(
            "Раздел,A,B\nВопрос,Город,Телефон\nПодсказка,,\nСтатус,обязательно,",
        ));
        let loaded = load_schema(&source).await;
        assert!(!loaded.is_fallback());
        assert_eq!(loaded.schema.sections(), &["A", "B"]);
        assert_eq!(
            loaded.origin,
            SchemaOrigin::Source {
                description: "static".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_load_schema_falls_back_on_fetch_error() {
        let loaded = load_schema(&StaticSource(Err("text/html"))).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.schema, default_schema());
        match loaded.origin {
            SchemaOrigin::Fallback { reason } => assert!(reason.contains("text/html")),
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_schema_falls_back_on_malformed_table() {
        let loaded = load_schema(&StaticSource(Ok("Раздел,A\nВопрос,Город"))).await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.schema.section_count(), 5);
    }
}
