//! Output format value object

use serde::{Deserialize, Serialize};

/// How analysis results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown rendered for the terminal (default)
    Report,
    /// Model text exactly as returned
    Raw,
    /// JSON document with analysis and answers
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Report
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "raw" => Ok(Self::Raw),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_report() {
        assert_eq!(OutputFormat::default(), OutputFormat::Report);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Raw).unwrap();
        assert_eq!(json, "\"raw\"");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("full".parse::<OutputFormat>().is_err());
    }
}
