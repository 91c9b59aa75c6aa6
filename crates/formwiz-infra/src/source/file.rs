//! Schema source backed by a local CSV export.

use std::path::PathBuf;

use formwiz_core::schema::SchemaSource;
use formwiz_types::error::SourceError;

/// Reads the schema CSV from a file on disk.
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSchemaSource {
    async fn fetch_csv(&self) -> Result<String, SourceError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwiz_core::schema::load_schema;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_and_compiles_local_export() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.csv");
        tokio::fs::write(
            &path,
            "Раздел,Контакты\r\nВопрос,Контактный email\r\nПодсказка,-\r\nСтатус,обязательно\r\n",
        )
        .await
        .unwrap();

        let loaded = load_schema(&FileSchemaSource::new(&path)).await;
        assert!(!loaded.is_fallback());
        assert_eq!(loaded.schema.fields().len(), 1);
        assert_eq!(loaded.schema.fields()[0].placeholder, "");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = FileSchemaSource::new("/nonexistent/formwiz/schema.csv");
        let err = source.fetch_csv().await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
        assert!(source.describe().contains("schema.csv"));
    }
}
