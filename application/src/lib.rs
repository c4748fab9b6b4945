//! Application layer for pid-insight
//!
//! This crate contains the session lifecycle use case and the port
//! definitions it depends on. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
};
pub use use_cases::analysis_session::{AnalysisSessionManager, SessionError};
