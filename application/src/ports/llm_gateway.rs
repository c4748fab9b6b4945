//! LLM Gateway port
//!
//! Defines the interface for talking to a conversational, multimodal model.

use async_trait::async_trait;
use pid_domain::{MessagePart, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credential missing or rejected; the configuration-class failure
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Whether the failure points at the API key / configuration rather
    /// than at the request itself.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Authentication(_))
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer opens conversations with a
/// model. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a new conversation configured with a fixed system instruction
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An open, stateful conversation with a model.
///
/// Every call appends one turn to the same conversation, so callers must not
/// issue overlapping calls on one session.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send one turn made of image and/or text parts.
    ///
    /// Returns `Ok(None)` when the model answered without any text; that is
    /// valid content, not an error. A failed call must leave the
    /// conversation as it was before the call.
    async fn send_parts(&self, parts: Vec<MessagePart>) -> Result<Option<String>, GatewayError>;

    /// Send a text-only turn
    async fn send(&self, content: &str) -> Result<Option<String>, GatewayError> {
        self.send_parts(vec![MessagePart::text(content)]).await
    }
}
