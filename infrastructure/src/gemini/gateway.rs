//! Gemini LLM Gateway implementation

use crate::gemini::session::GeminiSession;
use async_trait::async_trait;
use pid_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use pid_domain::Model;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings shared by every session of a gateway
#[derive(Clone)]
pub struct GeminiSettings {
    /// `None` when no key was found; every request then fails with an
    /// authentication error instead of aborting startup.
    pub api_key: Option<String>,
    /// Where the key was expected, for error messages
    pub api_key_env: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiSettings {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            api_key_env: "API_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn generate_url(&self, model: &Model) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.as_str()
        )
    }
}

// Keep the key out of debug output.
impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// LLM Gateway implementation for the Gemini REST API
pub struct GeminiLlmGateway {
    client: reqwest::Client,
    settings: Arc<GeminiSettings>,
}

impl GeminiLlmGateway {
    /// Create a new gateway. A missing API key is logged, not fatal.
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        if settings.api_key.is_none() {
            warn!(
                "No Gemini API key configured ({}); every request will fail",
                settings.api_key_env
            );
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(base_url = %settings.base_url, "GeminiLlmGateway initialized");

        Ok(Self {
            client,
            settings: Arc::new(settings),
        })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let session = GeminiSession::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            model.clone(),
            system_prompt,
        );
        Ok(Box::new(session))
    }
}
