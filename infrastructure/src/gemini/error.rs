//! Error types for the Gemini adapter

use pid_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when talking to the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is not configured (set {env_var})")]
    MissingApiKey { env_var: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<GeminiError> for GatewayError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::MissingApiKey { .. } => GatewayError::Authentication(error.to_string()),
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Http(e) if e.is_decode() => GatewayError::MalformedResponse(e.to_string()),
            GeminiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            GeminiError::ParseError { error, .. } => GatewayError::MalformedResponse(error),
            GeminiError::Api { status, message } => match status {
                401 | 403 => GatewayError::Authentication(message),
                // An invalid key comes back as 400 INVALID_ARGUMENT
                400 if message.contains("API key") => GatewayError::Authentication(message),
                429 => GatewayError::RateLimited(message),
                _ => GatewayError::RequestFailed(format!("HTTP {}: {}", status, message)),
            },
        }
    }
}
