//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Values that can be wrong
//! (model names, output format, timeout) are kept raw and parsed with
//! issue reporting so a bad field degrades to its default.

mod gemini;
mod logging;
mod output;
mod repl;

pub use gemini::{FALLBACK_API_KEY_ENV, FileGeminiConfig};
pub use logging::{FileLoggingConfig, expand_home};
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use pid_domain::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini connection settings
    pub gemini: FileGeminiConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Interactive chat settings
    pub repl: FileReplConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// The API key is not checked here since it usually comes from the
    /// environment; see [`FileConfig::missing_api_key_issue`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.gemini.parse_model().1);
        issues.extend(self.gemini.parse_timeout().1);
        issues.extend(self.output.parse_format().1);
        issues
    }

    /// Issue to report when no API key could be resolved.
    pub fn missing_api_key_issue(&self) -> ConfigIssue {
        ConfigIssue {
            severity: Severity::Error,
            code: ConfigIssueCode::MissingApiKey {
                env_var: self.gemini.api_key_env.clone(),
            },
            message: format!(
                "{} is missing from environment variables (also checked {})",
                self.gemini.api_key_env, FALLBACK_API_KEY_ENV
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pid_domain::{Model, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gemini]
model = "gemini-2.5-pro"
api_key_env = "PLANT_KEY"
timeout_secs = 30

[output]
format = "raw"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/pid-insight/history.txt"

[logging]
conversation_log = true
log_dir = "/tmp/pid-transcripts"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.parse_model().0, Model::Gemini25Pro);
        assert_eq!(config.gemini.api_key_env, "PLANT_KEY");
        assert_eq!(config.gemini.timeout_secs, 30);
        assert_eq!(config.output.parse_format().0, OutputFormat::Raw);
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert!(config.logging.conversation_log);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[gemini]
model = "gemini-exp-1206"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.gemini.parse_model().0,
            Model::Custom("gemini-exp-1206".to_string())
        );
        assert_eq!(config.gemini.api_key_env, "API_KEY");
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(!config.logging.conversation_log);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[gemini]
model = ""
timeout_secs = 0

[output]
format = "pdf"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_missing_api_key_issue_names_env_var() {
        let issue = FileConfig::default().missing_api_key_issue();
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(
            issue.code,
            ConfigIssueCode::MissingApiKey {
                env_var: "API_KEY".to_string()
            }
        );
        assert!(issue.message.contains("API_KEY is missing"));
    }
}
