//! Output configuration from TOML (`[output]` section)

use pid_domain::OutputFormat;
use pid_domain::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw output configuration from TOML
///
/// `format` stays a string so an unknown value can be reported as a warning
/// instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `report`, `raw` or `json`
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    pub fn parse_format(&self) -> (OutputFormat, Vec<ConfigIssue>) {
        let Some(raw) = self.format.as_deref() else {
            return (OutputFormat::default(), Vec::new());
        };
        match raw.parse::<OutputFormat>() {
            Ok(format) => (format, Vec::new()),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "output.format".to_string(),
                        value: raw.to_string(),
                        valid_values: vec![
                            "report".to_string(),
                            "raw".to_string(),
                            "json".to_string(),
                        ],
                    },
                    message: format!(
                        "output.format: unknown value '{}', falling back to 'report'",
                        raw
                    ),
                };
                (OutputFormat::default(), vec![issue])
            }
        }
    }
}
