//! Transcript configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write a JSONL transcript of each run
    pub conversation_log: bool,
    /// Transcript directory. Defaults to the platform data dir.
    pub log_dir: Option<String>,
}

impl FileLoggingConfig {
    /// Directory transcripts go to, or `None` when disabled.
    pub fn transcript_dir(&self) -> Option<PathBuf> {
        if !self.conversation_log {
            return None;
        }
        match &self.log_dir {
            Some(dir) => Some(expand_home(dir)),
            None => dirs::data_local_dir().map(|d| d.join("pid-insight").join("transcripts")),
        }
    }
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
