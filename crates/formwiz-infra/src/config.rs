//! Global configuration loader for formwiz.
//!
//! Reads `config.toml` from the data directory (`~/.formwiz/` in production)
//! and deserializes it into [`FormConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use formwiz_types::config::FormConfig;

/// Minimum dashboard refresh period (safety floor).
const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority: `FORMWIZ_DATA_DIR`, then `~/.formwiz`, then `./.formwiz`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FORMWIZ_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".formwiz");
    }

    PathBuf::from(".formwiz")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`FormConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> FormConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return FormConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                path = %config_path.display(),
                error = %err,
                "Unreadable config file, using defaults"
            );
            return FormConfig::default();
        }
    };

    match toml::from_str::<FormConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                path = %config_path.display(),
                error = %err,
                "Malformed config file, using defaults"
            );
            FormConfig::default()
        }
    }
}

/// Dashboard refresh period with the minimum floor applied.
pub fn refresh_interval(config: &FormConfig) -> Duration {
    Duration::from_secs(config.refresh_interval_secs.max(MIN_REFRESH_INTERVAL_SECS))
}

/// HTTP timeout for source requests.
pub fn request_timeout(config: &FormConfig) -> Duration {
    Duration::from_secs(config.request_timeout_secs.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert!(config.schema_url.is_none());
        assert_eq!(config.refresh_interval_secs, 60);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
schema_url = "https://sheets.example.com/export?format=csv"
submissions_url = "https://api.example.com/submissions"
validation_dismiss_secs = 8
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(
            config.schema_url.as_deref(),
            Some("https://sheets.example.com/export?format=csv")
        );
        assert_eq!(
            config.submissions_url.as_deref(),
            Some("https://api.example.com/submissions")
        );
        assert_eq!(config.validation_dismiss_secs, 8);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "schema_url = [not toml")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert!(config.schema_url.is_none());
        assert_eq!(config.validation_dismiss_secs, 5);
    }

    #[test]
    fn refresh_interval_enforces_minimum() {
        let config = FormConfig {
            refresh_interval_secs: 1,
            ..FormConfig::default()
        };
        assert_eq!(refresh_interval(&config), Duration::from_secs(MIN_REFRESH_INTERVAL_SECS));

        let config = FormConfig {
            refresh_interval_secs: 120,
            ..FormConfig::default()
        };
        assert_eq!(refresh_interval(&config), Duration::from_secs(120));
    }

    #[test]
    fn request_timeout_is_never_zero() {
        let config = FormConfig {
            request_timeout_secs: 0,
            ..FormConfig::default()
        };
        assert_eq!(request_timeout(&config), Duration::from_secs(1));
    }

    #[test]
    fn resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("FORMWIZ_DATA_DIR", "/tmp/test-formwiz");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-formwiz"));
        unsafe {
            std::env::remove_var("FORMWIZ_DATA_DIR");
        }
    }
}
