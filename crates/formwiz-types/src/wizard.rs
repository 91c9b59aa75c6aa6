//! Wizard session state and navigation outcomes.
//!
//! `WizardState` is owned by exactly one wizard session. The navigation logic
//! that mutates it lives in `formwiz-core::wizard`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mutable state of one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    /// Identifies the session in logs.
    pub session_id: Uuid,
    /// 1-based step number.
    pub current_step: usize,
    /// Live form values keyed by field key.
    pub values: BTreeMap<String, String>,
    /// Active per-field format errors keyed by field key.
    pub errors: BTreeMap<String, String>,
    /// Diagnostic from the last rejected forward move, if not yet dismissed.
    pub validation_message: Option<ValidationMessage>,
}

impl WizardState {
    /// Fresh state at step 1 with no values.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::now_v7(),
            current_step: 1,
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
            validation_message: None,
        }
    }

    /// Value for a key with surrounding whitespace removed ("" when unset).
    pub fn trimmed_value(&self, key: &str) -> &str {
        self.values.get(key).map(|v| v.trim()).unwrap_or("")
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a gating field blocked navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum IssueReason {
    /// No value, or only whitespace.
    Empty,
    /// A value is present but has an active format error.
    Invalid(String),
}

/// One unsatisfied field named in a validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub key: String,
    /// Display label when known, otherwise the key, or the question text when
    /// the key is empty.
    pub label: String,
    pub reason: IssueReason,
}

/// Structured diagnostic produced when a forward move is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// 1-based step that failed validation.
    pub step: usize,
    /// Section name of the failing step, when the schema has one.
    pub section: Option<String>,
    pub issues: Vec<FieldIssue>,
    pub shown_at: DateTime<Utc>,
    /// After this instant the message is dismissed automatically.
    pub expires_at: DateTime<Utc>,
}

impl ValidationMessage {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.section {
            Some(section) => write!(f, "Шаг {} «{}»: заполните поля: ", self.step, section)?,
            None => write!(f, "Шаг {}: заполните поля: ", self.step)?,
        }
        let labels: Vec<&str> = self.issues.iter().map(|i| i.label.as_str()).collect();
        write!(f, "{}", labels.join(", "))
    }
}

/// Result of a `request_advance` call.
///
/// Either outcome is a cue for the UI to scroll the form container into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// The step changed (or stayed put for a no-op request).
    Moved { from: usize, to: usize },
    /// The move was refused; the current step is unchanged.
    Rejected { message: ValidationMessage },
}

impl AdvanceOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, AdvanceOutcome::Moved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(section: Option<&str>) -> ValidationMessage {
        let now = Utc::now();
        ValidationMessage {
            step: 1,
            section: section.map(str::to_string),
            issues: vec![
                FieldIssue {
                    key: "company_name".to_string(),
                    label: "Название компании".to_string(),
                    reason: IssueReason::Empty,
                },
                FieldIssue {
                    key: "email".to_string(),
                    label: "email".to_string(),
                    reason: IssueReason::Invalid("bad".to_string()),
                },
            ],
            shown_at: now,
            expires_at: now + chrono::Duration::seconds(5),
        }
    }

    #[test]
    fn test_new_state_starts_at_step_one() {
        let state = WizardState::new();
        assert_eq!(state.current_step, 1);
        assert!(state.values.is_empty());
        assert!(state.errors.is_empty());
        assert!(state.validation_message.is_none());
    }

    #[test]
    fn test_trimmed_value() {
        let mut state = WizardState::new();
        state.values.insert("a".to_string(), "  x  ".to_string());
        assert_eq!(state.trimmed_value("a"), "x");
        assert_eq!(state.trimmed_value("missing"), "");
    }

    #[test]
    fn test_message_display_lists_labels() {
        let text = message(Some("О компании")).to_string();
        assert_eq!(
            text,
            "Шаг 1 «О компании»: заполните поля: Название компании, email"
        );
        assert!(message(None).to_string().starts_with("Шаг 1: "));
    }

    #[test]
    fn test_message_expiry() {
        let msg = message(None);
        assert!(!msg.is_expired(msg.shown_at));
        assert!(msg.is_expired(msg.expires_at));
    }

    #[test]
    fn test_outcome_serde_tag() {
        let outcome = AdvanceOutcome::Moved { from: 1, to: 2 };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "moved");
        assert!(outcome.is_moved());
    }
}
