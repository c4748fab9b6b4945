//! Gemini REST adapter
//!
//! Implements LlmGateway for the Google Gemini `generateContent` API.

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;

pub use error::GeminiError;
pub use gateway::{DEFAULT_BASE_URL, GeminiLlmGateway, GeminiSettings};
pub use session::GeminiSession;
