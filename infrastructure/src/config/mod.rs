//! Configuration file loading for pid-insight
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PID_INSIGHT_*` environment variables (`PID_INSIGHT_GEMINI__MODEL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./pid-insight.toml` or `./.pid-insight.toml`
//! 4. Global: `$XDG_CONFIG_HOME/pid-insight/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FALLBACK_API_KEY_ENV, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, expand_home,
};
pub use loader::ConfigLoader;
