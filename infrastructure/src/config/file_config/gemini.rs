//! Gemini connection settings from TOML (`[gemini]` section)

use crate::gemini::{DEFAULT_BASE_URL, GeminiSettings};
use pid_domain::Model;
use pid_domain::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Checked after `api_key_env` when that variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini configuration from TOML
///
/// # Example
///
/// ```toml
/// [gemini]
/// model = "gemini-2.5-flash"
/// api_key_env = "API_KEY"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Model used for analysis and follow-up questions
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key. Prefer the environment variable.
    pub api_key: Option<String>,
    /// REST endpoint root
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            api_key_env: "API_KEY".to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileGeminiConfig {
    /// Parse the configured model, reporting a blank name.
    pub fn parse_model(&self) -> (Model, Vec<ConfigIssue>) {
        if self.model.trim().is_empty() {
            let issue = ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::EmptyModelName {
                    field: "gemini.model".to_string(),
                },
                message: format!(
                    "gemini.model: model name cannot be empty, falling back to '{}'",
                    Model::default()
                ),
            };
            return (Model::default(), vec![issue]);
        }
        let Ok(model) = self.model.parse::<Model>();
        (model, Vec::new())
    }

    /// Timeout as a `Duration`, reporting zero.
    pub fn parse_timeout(&self) -> (Duration, Vec<ConfigIssue>) {
        if self.timeout_secs == 0 {
            let default = Self::default().timeout_secs;
            let issue = ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ZeroValue {
                    field: "gemini.timeout_secs".to_string(),
                },
                message: format!(
                    "gemini.timeout_secs: must be greater than 0, falling back to {}",
                    default
                ),
            };
            return (Duration::from_secs(default), vec![issue]);
        }
        (Duration::from_secs(self.timeout_secs), Vec::new())
    }

    /// Resolve the API key: inline value, then `api_key_env`, then
    /// `GEMINI_API_KEY`. Blank values count as unset.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        self.api_key
            .clone()
            .and_then(non_blank)
            .or_else(|| lookup(&self.api_key_env).and_then(non_blank))
            .or_else(|| lookup(FALLBACK_API_KEY_ENV).and_then(non_blank))
    }

    /// Resolve the API key from the process environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Build gateway settings with an already resolved key.
    pub fn to_settings(&self, api_key: Option<String>) -> GeminiSettings {
        let mut settings = GeminiSettings::new(api_key)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.parse_timeout().0);
        settings.api_key_env = self.api_key_env.clone();
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FileGeminiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_key_env, "API_KEY");
        assert_eq!(config.timeout_secs, 120);
        let (model, issues) = config.parse_model();
        assert_eq!(model, Model::Gemini25Flash);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_api_key_priority() {
        let mut config = FileGeminiConfig::default();
        let lookup = env(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "fallback")]);
        assert_eq!(config.resolve_api_key_with(&lookup), Some("primary".to_string()));

        config.api_key = Some("inline".to_string());
        assert_eq!(config.resolve_api_key_with(&lookup), Some("inline".to_string()));
    }

    #[test]
    fn test_api_key_fallback_env() {
        let config = FileGeminiConfig::default();
        let lookup = env(&[("API_KEY", "  "), ("GEMINI_API_KEY", "fallback")]);
        assert_eq!(config.resolve_api_key_with(lookup), Some("fallback".to_string()));
    }

    #[test]
    fn test_api_key_custom_env_name() {
        let config = FileGeminiConfig {
            api_key_env: "PLANT_GEMINI_KEY".to_string(),
            ..Default::default()
        };
        let lookup = env(&[("PLANT_GEMINI_KEY", "custom"), ("API_KEY", "ignored")]);
        assert_eq!(config.resolve_api_key_with(lookup), Some("custom".to_string()));
    }

    #[test]
    fn test_api_key_missing() {
        let config = FileGeminiConfig::default();
        assert_eq!(config.resolve_api_key_with(env(&[])), None);
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = FileGeminiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let (timeout, issues) = config.parse_timeout();
        assert_eq!(timeout, Duration::from_secs(120));
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0].code, ConfigIssueCode::ZeroValue { .. }));
    }

    #[test]
    fn test_blank_model_falls_back() {
        let config = FileGeminiConfig {
            model: " ".to_string(),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert_eq!(model, Model::Gemini25Flash);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_to_settings() {
        let config = FileGeminiConfig {
            api_key_env: "PLANT_GEMINI_KEY".to_string(),
            base_url: "http://localhost:9999".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let settings = config.to_settings(Some("k".to_string()));
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.api_key_env, "PLANT_GEMINI_KEY");
        assert_eq!(settings.base_url, "http://localhost:9999");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }
}
