//! Analysis session use case.
//!
//! [`AnalysisSessionManager`] owns the single live conversation about an
//! uploaded P&ID. It opens the conversation with the diagram, routes every
//! follow-up question into that same conversation, and drops it on reset or
//! when a new diagram arrives.
//!
//! # Ordering
//!
//! The gateway conversation is order-sensitive. Each live session sits
//! behind a FIFO-fair async mutex (the exchange slot), so follow-ups reach
//! the gateway one at a time and in the order they were issued, even when
//! callers do not await the previous answer.
//!
//! # Stale responses
//!
//! Every session carries a generation number. A response that comes back
//! after the session was reset or replaced is discarded and reported as
//! [`SessionError::Superseded`].

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use pid_domain::{
    DiagramImage, ExchangeKind, MessagePart, Model, PidPromptTemplate, Question, SessionState,
    preview,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the session lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The seeding exchange failed; no session is live afterwards.
    #[error("Diagram analysis failed: {0}")]
    AnalysisFailed(GatewayError),

    /// A follow-up exchange failed; the session stays live.
    #[error("Follow-up failed: {0}")]
    FollowUpFailed(GatewayError),

    #[error("No active analysis session. Please upload a diagram first.")]
    NoActiveSession,

    #[error("Question is empty")]
    EmptyQuestion,

    /// The session was reset or replaced while this exchange was in flight.
    #[error("Session was reset or replaced before the response arrived")]
    Superseded,
}

impl SessionError {
    /// The gateway failure behind this error, if any
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            SessionError::AnalysisFailed(e) | SessionError::FollowUpFailed(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the gateway rejected the API key
    pub fn is_configuration(&self) -> bool {
        self.gateway_error()
            .is_some_and(GatewayError::is_configuration)
    }
}

/// A live conversation plus its exchange slot.
struct LiveSession {
    generation: u64,
    exchange: tokio::sync::Mutex<Box<dyn LlmSession>>,
}

#[derive(Default)]
struct Slot {
    /// Bumped on every begin/reset; identifies the current session.
    generation: u64,
    live: Option<Arc<LiveSession>>,
}

/// Owns at most one live analysis session.
///
/// Callers hold the manager (usually behind an `Arc`), never the session.
pub struct AnalysisSessionManager {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    slot: Mutex<Slot>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnalysisSessionManager {
    pub fn new(gateway: Arc<dyn LlmGateway>, model: Model) -> Self {
        Self {
            gateway,
            model,
            slot: Mutex::new(Slot::default()),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Model every new session is opened with
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        if self.lock_slot().live.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        }
    }

    /// Start a new conversation about `image` and return the model's analysis.
    ///
    /// Any live session is discarded before the new one is opened, so a
    /// failure here always leaves the manager [`SessionState::Idle`].
    pub async fn begin_analysis(&self, image: DiagramImage) -> Result<String, SessionError> {
        let generation = {
            let mut slot = self.lock_slot();
            slot.generation += 1;
            if slot.live.take().is_some() {
                info!("Discarding previous analysis session");
            }
            slot.generation
        };

        info!(
            model = %self.model,
            media_type = %image.media_type(),
            bytes = image.len(),
            "Starting diagram analysis"
        );
        self.log(
            "analysis_started",
            serde_json::json!({
                "generation": generation,
                "model": self.model.as_str(),
                "media_type": image.media_type().as_str(),
                "bytes": image.len(),
            }),
        );

        let session = match self
            .gateway
            .create_session_with_system_prompt(&self.model, PidPromptTemplate::system_instruction())
            .await
        {
            Ok(session) => session,
            Err(e) => return Err(self.analysis_failed(generation, e)),
        };

        let parts = vec![
            MessagePart::image(image),
            MessagePart::text(PidPromptTemplate::analysis_request()),
        ];
        let reply = match session.send_parts(parts).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.analysis_failed(generation, e)),
        };
        let (text, fallback) = with_fallback(reply, PidPromptTemplate::empty_analysis());

        {
            let mut slot = self.lock_slot();
            if slot.generation != generation {
                drop(slot);
                self.discarded(generation, ExchangeKind::Seeding);
                return Err(SessionError::Superseded);
            }
            slot.live = Some(Arc::new(LiveSession {
                generation,
                exchange: tokio::sync::Mutex::new(session),
            }));
        }

        info!(chars = text.len(), fallback, "Diagram analysis completed");
        self.log(
            "analysis_completed",
            serde_json::json!({
                "generation": generation,
                "fallback": fallback,
                "text": text,
            }),
        );
        Ok(text)
    }

    /// Ask a question about the diagram of the live session.
    ///
    /// The question is sent verbatim as a text-only turn. On gateway failure
    /// the session stays live and unchanged, so the caller may retry.
    pub async fn ask_follow_up(&self, question: &str) -> Result<String, SessionError> {
        let live = self
            .lock_slot()
            .live
            .clone()
            .ok_or(SessionError::NoActiveSession)?;
        let question = Question::try_new(question).ok_or(SessionError::EmptyQuestion)?;

        // Queue behind earlier exchanges on this session.
        let session = live.exchange.lock().await;
        if !self.is_current(live.generation) {
            debug!("Session ended while follow-up was queued; not sending");
            return Err(SessionError::Superseded);
        }

        debug!(question = %preview(question.content(), 80), "Sending follow-up");
        self.log(
            "follow_up_sent",
            serde_json::json!({
                "generation": live.generation,
                "question": question.content(),
            }),
        );

        let result = session
            .send_parts(vec![MessagePart::text(question.into_content())])
            .await;
        drop(session);

        if !self.is_current(live.generation) {
            self.discarded(live.generation, ExchangeKind::FollowUp);
            return Err(SessionError::Superseded);
        }

        match result {
            Ok(reply) => {
                let (text, fallback) = with_fallback(reply, PidPromptTemplate::empty_answer());
                self.log(
                    "follow_up_answered",
                    serde_json::json!({
                        "generation": live.generation,
                        "fallback": fallback,
                        "text": text,
                    }),
                );
                Ok(text)
            }
            Err(e) => {
                warn!("Follow-up failed: {}", e);
                self.log(
                    "follow_up_failed",
                    serde_json::json!({
                        "generation": live.generation,
                        "error": e.to_string(),
                    }),
                );
                Err(SessionError::FollowUpFailed(e))
            }
        }
    }

    /// Drop the live session, if any. Idempotent.
    pub fn reset(&self) {
        let previous = {
            let mut slot = self.lock_slot();
            slot.generation += 1;
            slot.live.take()
        };
        if let Some(live) = previous {
            info!("Analysis session reset");
            self.log(
                "session_reset",
                serde_json::json!({ "generation": live.generation }),
            );
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        // Slot updates are single assignments, so a poisoned guard is still consistent.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        let slot = self.lock_slot();
        slot.generation == generation && slot.live.is_some()
    }

    fn analysis_failed(&self, generation: u64, error: GatewayError) -> SessionError {
        warn!("Diagram analysis failed: {}", error);
        self.log(
            "analysis_failed",
            serde_json::json!({
                "generation": generation,
                "error": error.to_string(),
            }),
        );
        SessionError::AnalysisFailed(error)
    }

    fn discarded(&self, generation: u64, kind: ExchangeKind) {
        info!(
            exchange = kind.as_str(),
            "Discarding response for a session that is no longer live"
        );
        self.log(
            "response_discarded",
            serde_json::json!({
                "generation": generation,
                "exchange": kind.as_str(),
            }),
        );
    }

    fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.conversation_logger
            .log(ConversationEvent::new(event_type, payload));
    }
}

/// Substitute `fallback` when the model produced no text.
fn with_fallback(reply: Option<String>, fallback: &str) -> (String, bool) {
    match reply {
        Some(text) if !text.is_empty() => (text, false),
        _ => (fallback.to_string(), true),
    }
}
