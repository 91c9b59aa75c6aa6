//! Global configuration types for formwiz.
//!
//! `FormConfig` represents the top-level `config.toml`: where the schema
//! spreadsheet and collaborator records live, and the timing knobs of the
//! wizard and the dashboard.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.formwiz/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// CSV export URL of the schema spreadsheet.
    #[serde(default)]
    pub schema_url: Option<String>,

    /// Collaborator endpoint returning submission records.
    #[serde(default)]
    pub submissions_url: Option<String>,

    /// Collaborator endpoint returning scoring records.
    #[serde(default)]
    pub scores_url: Option<String>,

    /// Record field used to pair submissions with scores.
    #[serde(default = "default_company_name_field")]
    pub company_name_field: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Dashboard refresh period in `--watch` mode.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// How long a rejected-navigation message stays visible.
    #[serde(default = "default_validation_dismiss_secs")]
    pub validation_dismiss_secs: u64,
}

fn default_company_name_field() -> String {
    "Название компании".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_validation_dismiss_secs() -> u64 {
    5
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            schema_url: None,
            submissions_url: None,
            scores_url: None,
            company_name_field: default_company_name_field(),
            request_timeout_secs: default_request_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            validation_dismiss_secs: default_validation_dismiss_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_config_default_values() {
        let config = FormConfig::default();
        assert!(config.schema_url.is_none());
        assert_eq!(config.company_name_field, "Название компании");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.validation_dismiss_secs, 5);
    }

    #[test]
    fn test_form_config_deserialize_with_defaults() {
        let config: FormConfig = toml::from_str("").unwrap();
        assert!(config.submissions_url.is_none());
        assert_eq!(config.validation_dismiss_secs, 5);
    }

    #[test]
    fn test_form_config_deserialize_with_values() {
        let toml_str = r#"
schema_url = "https://docs.example.com/export?format=csv"
scores_url = "https://api.example.com/scores"
company_name_field = "Company"
refresh_interval_secs = 30
"#;
        let config: FormConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.schema_url.as_deref(),
            Some("https://docs.example.com/export?format=csv")
        );
        assert_eq!(config.scores_url.as_deref(), Some("https://api.example.com/scores"));
        assert_eq!(config.company_name_field, "Company");
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.request_timeout_secs, 15);
    }
}
