//! Presentation-level configuration
//!
//! Settings resolved from CLI flags and the config file, in the shape the
//! front end needs them.

use pid_domain::OutputFormat;
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Report,
            color: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ReplConfig {
    /// Show the spinner while waiting on the model
    pub show_progress: bool,
    /// Line-editor history file
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: dirs::data_dir().map(|p| p.join("pid-insight").join("history.txt")),
        }
    }
}
