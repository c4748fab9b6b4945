//! Session transcript logging.
//!
//! Provides [`JsonlConversationLogger`], the JSONL implementation of the
//! [`ConversationLogger`](pid_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
