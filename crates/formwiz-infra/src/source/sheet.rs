//! Schema source backed by a spreadsheet's CSV export URL.
//!
//! Published spreadsheets answer with an HTML sign-in or error page when the
//! export is not accessible, so anything that is not CSV counts as a failed
//! fetch.

use std::time::Duration;

use formwiz_core::schema::SchemaSource;
use formwiz_types::error::SourceError;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::source::http_client;

/// MIME types accepted as a CSV export.
const CSV_MIME_TYPES: &[&str] = &[
    "text/csv",
    "application/csv",
    "text/comma-separated-values",
];

/// Fetches the schema CSV over HTTP.
pub struct HttpSchemaSource {
    url: String,
    http: reqwest::Client,
}

impl HttpSchemaSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            http: http_client(timeout),
        }
    }
}

impl SchemaSource for HttpSchemaSource {
    async fn fetch_csv(&self) -> Result<String, SourceError> {
        debug!(url = %self.url, "Fetching schema CSV");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_csv_content_type(&content_type) {
            return Err(SourceError::UnexpectedContentType(content_type));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Whether a `Content-Type` header value denotes CSV (parameters ignored).
pub fn is_csv_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    CSV_MIME_TYPES.contains(&essence.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_content_types_are_accepted() {
        assert!(is_csv_content_type("text/csv"));
        assert!(is_csv_content_type("text/csv; charset=utf-8"));
        assert!(is_csv_content_type("Text/CSV"));
        assert!(is_csv_content_type("application/csv"));
    }

    #[test]
    fn other_content_types_are_rejected() {
        assert!(!is_csv_content_type("text/html; charset=utf-8"));
        assert!(!is_csv_content_type("application/json"));
        assert!(!is_csv_content_type(""));
    }

    #[test]
    fn describe_is_the_url() {
        let source =
            HttpSchemaSource::new("https://sheets.example.com/export", Duration::from_secs(5));
        assert_eq!(source.describe(), "https://sheets.example.com/export");
    }
}
