//! Presentation layer for pid-insight
//!
//! This crate contains CLI definitions, diagram intake, output formatters,
//! progress indication, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod intake;
pub mod oneshot;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatRepl, ReplCommand, Transcript};
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use intake::{IntakeError, load_diagram};
pub use oneshot::run_one_shot;
pub use output::{AnalysisReport, ConsoleFormatter, OutputFormatter, messages};
pub use progress::ProgressReporter;
