//! Validation-gated step navigation.
//!
//! A `Wizard` owns one immutable `Schema` and one `WizardState`. Steps are
//! 1-based; step `n` shows the fields of the schema's `n`-th section.
//!
//! Moving backward (or staying put) is never validated. Moving forward checks
//! the gating fields of every step being left behind: required fields plus
//! email/tel fields, each of which needs a non-empty value and no active
//! format error. A rejected move leaves the step unchanged and records a
//! `ValidationMessage` that expires after the dismiss delay.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use formwiz_types::schema::{FieldDefinition, Schema};
use formwiz_types::wizard::{
    AdvanceOutcome, FieldIssue, IssueReason, ValidationMessage, WizardState,
};
use tracing::debug;

use crate::field_key::{bind_field_keys, field_label};
use crate::wizard::validate::validate_value;
use crate::wizard::{DEFAULT_DISMISS_SECS, DEFAULT_STEP_COUNT};

/// Upper bound for the configurable dismiss delay.
const MAX_DISMISS_SECS: u64 = 24 * 60 * 60;

/// Multi-step form session over a compiled schema.
#[derive(Debug, Clone)]
pub struct Wizard {
    schema: Schema,
    /// Field keys, parallel to `schema.fields()`.
    keys: Vec<String>,
    state: WizardState,
    dismiss_after: Duration,
}

impl Wizard {
    /// Start a session at step 1.
    pub fn new(schema: Schema) -> Self {
        let keys = bind_field_keys(&schema);
        Self {
            schema,
            keys,
            state: WizardState::new(),
            dismiss_after: Duration::seconds(DEFAULT_DISMISS_SECS as i64),
        }
    }

    /// Override how long a validation message stays visible.
    ///
    /// The standard delay is 5 seconds ([`DEFAULT_DISMISS_SECS`]); other
    /// values come from the `validation_dismiss_secs` setting.
    pub fn with_dismiss_after_secs(mut self, secs: u64) -> Self {
        self.dismiss_after = Duration::seconds(secs.min(MAX_DISMISS_SECS) as i64);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    /// Number of steps: one per section, or the default count when the
    /// schema has no sections.
    pub fn step_count(&self) -> usize {
        match self.schema.section_count() {
            0 => DEFAULT_STEP_COUNT,
            n => n,
        }
    }

    /// Fields of a step paired with their keys.
    pub fn step_fields(&self, step: usize) -> impl Iterator<Item = (&FieldDefinition, &str)> {
        let section = self.schema.section_for_step(step);
        self.schema
            .fields()
            .iter()
            .zip(self.keys.iter())
            .filter(move |(f, _)| section.is_some_and(|s| f.section == s))
            .map(|(f, k)| (f, k.as_str()))
    }

    /// Current value of a field ("" when unset).
    pub fn value(&self, key: &str) -> &str {
        self.state.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Record user input for a field and refresh its format error.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let error = self
            .schema
            .fields()
            .iter()
            .zip(self.keys.iter())
            .find(|(_, k)| k.as_str() == key)
            .and_then(|(field, _)| validate_value(field, &value));

        match error {
            Some(error) => {
                self.state.errors.insert(key.to_string(), error);
            }
            None => {
                self.state.errors.remove(key);
            }
        }
        self.state.values.insert(key.to_string(), value);
    }

    /// Active format error for a field.
    pub fn error(&self, key: &str) -> Option<&str> {
        self.state.errors.get(key).map(String::as_str)
    }

    /// Request a move to `target`, stamping any diagnostic with the current time.
    pub fn request_advance(&mut self, target: usize) -> AdvanceOutcome {
        self.request_advance_at(target, Utc::now())
    }

    /// Request a move to `target` as of `now`.
    ///
    /// Targets outside `1..=step_count` are clamped into range.
    pub fn request_advance_at(&mut self, target: usize, now: DateTime<Utc>) -> AdvanceOutcome {
        let from = self.state.current_step;
        let target = target.clamp(1, self.step_count());

        if target > from {
            for step in from..target {
                let issues = self.step_issues(step);
                if issues.is_empty() {
                    continue;
                }

                debug!(
                    session = %self.state.session_id,
                    from,
                    target,
                    failing_step = step,
                    missing = issues.len(),
                    "Rejected forward navigation"
                );
                let message = ValidationMessage {
                    step,
                    section: self.schema.section_for_step(step).map(str::to_string),
                    issues,
                    shown_at: now,
                    expires_at: now + self.dismiss_after,
                };
                self.state.validation_message = Some(message.clone());
                return AdvanceOutcome::Rejected { message };
            }
        }

        debug!(session = %self.state.session_id, from, to = target, "Moved to step");
        self.state.current_step = target;
        self.state.validation_message = None;
        AdvanceOutcome::Moved { from, to: target }
    }

    /// Gating fields of a step that would block leaving it, in column order.
    pub fn step_issues(&self, step: usize) -> Vec<FieldIssue> {
        let mut seen = HashSet::new();
        let mut issues = Vec::new();

        for (field, key) in self.step_fields(step) {
            if !field.is_gating() || !seen.insert(key) {
                continue;
            }
            let reason = if self.state.trimmed_value(key).is_empty() {
                IssueReason::Empty
            } else if let Some(error) = self.state.errors.get(key) {
                IssueReason::Invalid(error.clone())
            } else {
                continue;
            };
            issues.push(FieldIssue {
                key: key.to_string(),
                label: display_label(field, key),
                reason,
            });
        }
        issues
    }

    /// Whether every step before `step` has all required fields filled.
    ///
    /// Used to enable step shortcuts; format errors are not considered.
    pub fn is_step_accessible(&self, step: usize) -> bool {
        (1..step).all(|s| self.required_filled(s))
    }

    fn required_filled(&self, step: usize) -> bool {
        self.step_fields(step)
            .filter(|(field, _)| field.required)
            .all(|(_, key)| !self.state.trimmed_value(key).is_empty())
    }

    /// The pending validation message, ignoring expiry.
    pub fn validation_message(&self) -> Option<&ValidationMessage> {
        self.state.validation_message.as_ref()
    }

    /// The pending validation message if it is still visible at `now`.
    pub fn validation_message_at(&self, now: DateTime<Utc>) -> Option<&ValidationMessage> {
        self.state
            .validation_message
            .as_ref()
            .filter(|m| !m.is_expired(now))
    }

    /// Drop the validation message if it has expired. Returns whether it was dropped.
    pub fn expire_validation_message(&mut self, now: DateTime<Utc>) -> bool {
        let expired = self
            .state
            .validation_message
            .as_ref()
            .is_some_and(|m| m.is_expired(now));
        if expired {
            self.state.validation_message = None;
        }
        expired
    }

    /// Dismiss the validation message on user request.
    pub fn dismiss_validation_message(&mut self) {
        self.state.validation_message = None;
    }
}

/// Dictionary label, else the key, else the question itself.
fn display_label(field: &FieldDefinition, key: &str) -> String {
    match field_label(key) {
        Some(label) => label.to_string(),
        None if !key.is_empty() => key.to_string(),
        None => field.question.clone(),
    }
}
