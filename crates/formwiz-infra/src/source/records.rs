//! Record source backed by the collaborator's JSON endpoints.

use std::time::Duration;

use anyhow::Context;
use formwiz_core::scoring::{records_from_json, RecordSource};
use formwiz_types::error::SourceError;
use formwiz_types::record::Record;
use tracing::debug;

use crate::source::http_client;

/// Fetches submission and scoring records over HTTP.
///
/// Either URL may be unset; fetching from an unset URL is an error that
/// `load_dashboard` turns into an empty result.
pub struct HttpRecordSource {
    submissions_url: Option<String>,
    scores_url: Option<String>,
    http: reqwest::Client,
}

impl HttpRecordSource {
    pub fn new(
        submissions_url: Option<String>,
        scores_url: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            submissions_url,
            scores_url,
            http: http_client(timeout),
        }
    }

    async fn fetch_records(
        &self,
        url: Option<&str>,
        what: &'static str,
    ) -> anyhow::Result<Vec<Record>> {
        let url = url.ok_or(SourceError::NotConfigured(what))?;
        debug!(%url, what, "Fetching collaborator records");

        let payload: serde_json::Value = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {what} from {url}"))?
            .error_for_status()
            .with_context(|| format!("HTTP error fetching {what} from {url}"))?
            .json()
            .await
            .with_context(|| format!("Failed to parse {what} response"))?;

        Ok(records_from_json(payload))
    }
}

impl RecordSource for HttpRecordSource {
    async fn fetch_submissions(&self) -> anyhow::Result<Vec<Record>> {
        self.fetch_records(self.submissions_url.as_deref(), "submissions_url")
            .await
    }

    async fn fetch_scores(&self) -> anyhow::Result<Vec<Record>> {
        self.fetch_records(self.scores_url.as_deref(), "scores_url").await
    }
}
