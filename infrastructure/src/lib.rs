//! Infrastructure layer for pid-insight
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Gemini REST gateway, the JSONL transcript
//! logger, and configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig,
};
pub use gemini::{
    DEFAULT_BASE_URL, GeminiError, GeminiLlmGateway, GeminiSession, GeminiSettings,
};
pub use logging::JsonlConversationLogger;
