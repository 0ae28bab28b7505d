use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::SubmissionConfig;
use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_ENDPOINT_TIMEOUT_MS, DEFAULT_MAX_LINKS,
    DEFAULT_MIN_FILL_MS, DEFAULT_PENDING_DIR, ENDPOINT_URL_ENV, MESSAGE_MAX_CHARS,
    PENDING_DIR_ENV,
};
use crate::error::{LeadError, Result};
use crate::pipeline::{LeadNormalizer, SpamFilterConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub form: FormConfig,
    pub spam: SpamConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: DEFAULT_ENDPOINT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub message_max_chars: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            message_max_chars: MESSAGE_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpamConfig {
    pub min_fill_ms: u64,
    pub max_links: usize,
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            min_fill_ms: DEFAULT_MIN_FILL_MS,
            max_links: DEFAULT_MAX_LINKS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub pending_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            pending_dir: PathBuf::from(DEFAULT_PENDING_DIR),
        }
    }
}

impl Config {
    /// Load from `$LEAD_CAPTURE_CONFIG` or `lead_capture.toml`, falling back
    /// to defaults when the file is absent, then apply env overrides.
    pub fn load() -> Result<Self> {
        let (path, explicit) = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let mut config = if explicit || path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LeadError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENDPOINT_URL_ENV) {
            self.endpoint.url = Some(url);
        }
        if let Ok(dir) = std::env::var(PENDING_DIR_ENV) {
            self.storage.pending_dir = PathBuf::from(dir);
        }
    }

    fn check(&self) -> Result<()> {
        if self.endpoint.timeout_ms == 0 {
            return Err(LeadError::Config(
                "endpoint.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.form.message_max_chars == 0 {
            return Err(LeadError::Config(
                "form.message_max_chars must be greater than zero".to_string(),
            ));
        }
        if self.form.message_max_chars > MESSAGE_MAX_CHARS {
            return Err(LeadError::Config(format!(
                "form.message_max_chars must be at most {}",
                MESSAGE_MAX_CHARS
            )));
        }
        Ok(())
    }

    pub fn submission_config(&self) -> SubmissionConfig {
        SubmissionConfig {
            endpoint_url: self.endpoint.url.clone(),
            timeout: Duration::from_millis(self.endpoint.timeout_ms),
        }
    }

    pub fn spam_filter_config(&self) -> SpamFilterConfig {
        SpamFilterConfig {
            min_fill_time: chrono::Duration::milliseconds(self.spam.min_fill_ms as i64),
            max_links: self.spam.max_links,
        }
    }

    pub fn normalizer(&self) -> LeadNormalizer {
        LeadNormalizer::new(self.form.message_max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.endpoint.url.is_none());
        assert_eq!(config.endpoint.timeout_ms, DEFAULT_ENDPOINT_TIMEOUT_MS);
        assert_eq!(config.form.message_max_chars, 1000);
        assert_eq!(config.storage.pending_dir, PathBuf::from(DEFAULT_PENDING_DIR));
        assert!(config.submission_config().endpoint().is_none());
    }

    #[test]
    fn test_partial_toml_overrides_sections() {
        let config = Config::from_toml(
            r#"
            [endpoint]
            url = "https://leads.example.test/collect"
            timeout_ms = 2500

            [spam]
            max_links = 0
            "#,
        )
        .unwrap();

        let submission = config.submission_config();
        assert_eq!(submission.endpoint(), Some("https://leads.example.test/collect"));
        assert_eq!(submission.timeout, Duration::from_millis(2500));
        assert_eq!(config.spam_filter_config().max_links, 0);
        assert_eq!(
            config.spam_filter_config().min_fill_time,
            chrono::Duration::milliseconds(1000)
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_toml("[endpoint]\ntimeout_ms = 0").unwrap_err();
        assert!(matches!(err, LeadError::Config(_)));
    }

    #[test]
    fn test_message_limit_above_validator_cap_rejected() {
        let err = Config::from_toml("[form]\nmessage_max_chars = 1500").unwrap_err();
        assert!(err.to_string().contains("at most 1000"));

        let config = Config::from_toml("[form]\nmessage_max_chars = 500").unwrap();
        assert_eq!(config.normalizer().message_max_chars, 500);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
