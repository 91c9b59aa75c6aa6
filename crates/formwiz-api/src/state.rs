//! Application state shared by the command handlers.
//!
//! The source traits are generic (RPITIT), so `AppState` picks the concrete
//! infra implementation per call instead of holding trait objects.

use std::path::PathBuf;

use formwiz_core::schema::{default_schema, load_schema, LoadedSchema, SchemaOrigin};
use formwiz_infra::config::{load_config, request_timeout, resolve_data_dir};
use formwiz_infra::source::{FileSchemaSource, HttpRecordSource, HttpSchemaSource};
use formwiz_types::config::FormConfig;
use tracing::info;

use crate::cli::SchemaArgs;

pub struct AppState {
    pub config: FormConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory and read its `config.toml`.
    pub async fn init() -> Self {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;
        Self { config, data_dir }
    }

    /// Load the schema from `--file`, `--url`, or the configured URL, in
    /// that order. With none of them the default schema is used.
    pub async fn load_schema(&self, args: &SchemaArgs) -> LoadedSchema {
        if let Some(path) = &args.file {
            return load_schema(&FileSchemaSource::new(path)).await;
        }

        let url = args.url.as_ref().or(self.config.schema_url.as_ref());
        match url {
            Some(url) => {
                let source = HttpSchemaSource::new(url.clone(), request_timeout(&self.config));
                load_schema(&source).await
            }
            None => {
                info!("No schema source configured, using default schema");
                LoadedSchema {
                    schema: default_schema(),
                    origin: SchemaOrigin::Fallback {
                        reason: "no schema source configured".to_string(),
                    },
                    skipped_columns: Vec::new(),
                }
            }
        }
    }

    pub fn record_source(&self) -> HttpRecordSource {
        HttpRecordSource::new(
            self.config.submissions_url.clone(),
            self.config.scores_url.clone(),
            request_timeout(&self.config),
        )
    }
}
