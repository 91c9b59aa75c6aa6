//! Pairing submissions with externally computed scores.
//!
//! Submissions and scores come from a collaborator service. A submission is
//! matched to a scoring record when their company-name fields are equal after
//! trimming and lower-casing. This path never fails: unreachable sources
//! degrade to no submissions or no scores.

use std::collections::HashMap;
use std::future::Future;

use chrono::Utc;
use formwiz_types::record::{field_text, DashboardSnapshot, Record, ScoredSubmission};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// RecordSource trait (RPITIT)
// ---------------------------------------------------------------------------

/// Collaborator service delivering submission and scoring records.
pub trait RecordSource: Send + Sync {
    fn fetch_submissions(&self) -> impl Future<Output = anyhow::Result<Vec<Record>>> + Send;

    fn fetch_scores(&self) -> impl Future<Output = anyhow::Result<Vec<Record>>> + Send;
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Normalized matching key for a company name.
pub fn normalize_company_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Attach to each submission the first scoring record with the same
/// normalized company name. Submissions without a name get no score.
pub fn merge_scores(
    submissions: Vec<Record>,
    scores: Vec<Record>,
    name_field: &str,
) -> Vec<ScoredSubmission> {
    let mut by_name: HashMap<String, Record> = HashMap::new();
    for score in scores {
        let Some(name) = field_text(&score, name_field).map(|n| normalize_company_name(&n)) else {
            continue;
        };
        if !name.is_empty() {
            by_name.entry(name).or_insert(score);
        }
    }

    submissions
        .into_iter()
        .map(|submission| {
            let score = field_text(&submission, name_field)
                .map(|n| normalize_company_name(&n))
                .filter(|n| !n.is_empty())
                .and_then(|n| by_name.get(&n).cloned());
            ScoredSubmission { submission, score }
        })
        .collect()
}

/// Fetch and merge both record sets, degrading instead of failing.
pub async fn load_dashboard<R: RecordSource>(source: &R, name_field: &str) -> DashboardSnapshot {
    let submissions = match source.fetch_submissions().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Failed to fetch submissions, showing none");
            Vec::new()
        }
    };

    let scores = if submissions.is_empty() {
        Vec::new()
    } else {
        match source.fetch_scores().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to fetch scores, showing submissions unscored");
                Vec::new()
            }
        }
    };

    let entries = merge_scores(submissions, scores, name_field);
    debug!(
        submissions = entries.len(),
        scored = entries.iter().filter(|e| e.score.is_some()).count(),
        "Merged dashboard records"
    );

    DashboardSnapshot {
        entries,
        fetched_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Payload decoding
// ---------------------------------------------------------------------------

/// Decode a collaborator payload into records.
///
/// Accepts either an array of objects or a sheet-style table
/// `{"values": [[header, ...], [cell, ...], ...]}` whose first row names the
/// fields. Anything else decodes to no records.
pub fn records_from_json(payload: serde_json::Value) -> Vec<Record> {
    match payload {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        serde_json::Value::Object(mut map) => match map.remove("values") {
            Some(serde_json::Value::Array(rows)) => records_from_table(rows),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn records_from_table(rows: Vec<serde_json::Value>) -> Vec<Record> {
    let mut rows = rows.into_iter().filter_map(|row| match row {
        serde_json::Value::Array(cells) => Some(cells),
        _ => None,
    });
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header
        .iter()
        .map(|cell| match cell {
            serde_json::Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        })
        .collect();

    rows.map(|cells| {
        header
            .iter()
            .zip(cells.into_iter().chain(std::iter::repeat(serde_json::Value::Null)))
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, cell)| (name.clone(), cell))
            .collect::<Record>()
    })
    .collect()
}
