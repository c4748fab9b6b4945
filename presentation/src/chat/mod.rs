//! Interactive chat module
//!
//! Provides a readline-based chat about one loaded diagram at a time.

mod repl;
mod transcript;

pub use repl::{ChatRepl, ReplCommand};
pub use transcript::{ChatMessage, Transcript};
