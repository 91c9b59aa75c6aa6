//! Submission and scoring records received from the collaborator service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A string-keyed record as delivered by the collaborator.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A submission paired with the scoring record that matched it, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSubmission {
    pub submission: Record,
    pub score: Option<Record>,
}

/// One refresh of the review dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub entries: Vec<ScoredSubmission>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Number of submissions that found a scoring record.
    pub fn scored_count(&self) -> usize {
        self.entries.iter().filter(|e| e.score.is_some()).count()
    }
}

/// Read a record field as display text.
///
/// Strings are returned as-is, numbers and booleans are formatted, and
/// null/missing/compound values yield `None`.
pub fn field_text(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
