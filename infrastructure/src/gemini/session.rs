//! Gemini session implementation
//!
//! Wraps the stateless `generateContent` endpoint to implement the
//! `LlmSession` trait. The conversation history lives here and is replayed
//! on every call.

use crate::gemini::error::{GeminiError, Result};
use crate::gemini::gateway::GeminiSettings;
use crate::gemini::protocol::{
    Content, GenerateContentRequest, GenerateContentResponse, Part, error_message,
};
use async_trait::async_trait;
use pid_application::ports::llm_gateway::{GatewayError, LlmSession};
use pid_domain::{MessagePart, Model};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct GeminiSession {
    client: reqwest::Client,
    settings: Arc<GeminiSettings>,
    model: Model,
    system_instruction: Content,
    /// Conversation history (stateless API requires full history each call)
    history: Mutex<Vec<Content>>,
}

impl GeminiSession {
    pub fn new(
        client: reqwest::Client,
        settings: Arc<GeminiSettings>,
        model: Model,
        system_instruction: &str,
    ) -> Self {
        Self {
            client,
            settings,
            model,
            system_instruction: Content::system(system_instruction),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Number of turns recorded so far
    pub async fn turn_count(&self) -> usize {
        self.history.lock().await.len()
    }

    async fn generate(&self, contents: &[Content]) -> Result<GenerateContentResponse> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| GeminiError::MissingApiKey {
                env_var: self.settings.api_key_env.clone(),
            })?;

        let request = GenerateContentRequest {
            contents: contents.to_vec(),
            system_instruction: Some(self.system_instruction.clone()),
        };

        debug!(
            model = %self.model,
            turns = contents.len(),
            "Calling Gemini generateContent"
        );

        let response = self
            .client
            .post(self.settings.generate_url(&self.model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::ParseError {
            error: e.to_string(),
            raw: body,
        })
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_parts(
        &self,
        parts: Vec<MessagePart>,
    ) -> std::result::Result<Option<String>, GatewayError> {
        let mut history = self.history.lock().await;
        history.push(Content::user(parts.into_iter().map(Part::from).collect()));

        let response = match self.generate(&history).await {
            Ok(response) => response,
            Err(e) => {
                // Roll back the unanswered turn so a retry sees the same conversation
                history.pop();
                return Err(e.into());
            }
        };

        let text = response.text();
        match &text {
            Some(text) => history.push(Content::model(text.clone())),
            None => {
                // A turn without a model reply would leave two user turns in a row
                history.pop();
                warn!(
                    block_reason = response.block_reason().unwrap_or("none"),
                    finish_reason = response.finish_reason().unwrap_or("none"),
                    "Gemini returned no text"
                );
            }
        }
        Ok(text)
    }
}
