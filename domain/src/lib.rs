//! Domain layer for pid-insight
//!
//! This crate contains the value objects the diagram assistant is built on.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Diagram**: one uploaded P&ID image ([`DiagramImage`]), validated on
//!   construction (non-empty, at most 10 MiB, `image/*` media type)
//! - **Session**: one continuous conversation with the model, bound to a
//!   single diagram; it is either [`SessionState::Idle`] or
//!   [`SessionState::Active`]
//! - **Exchange**: one request/response turn, either the seeding turn
//!   (image + analysis request) or a text-only follow-up

pub mod config;
pub mod core;
pub mod diagram;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model, question::Question};
pub use diagram::{
    image::{DiagramImage, MAX_IMAGE_BYTES},
    media_type::MediaType,
};
pub use prompt::PidPromptTemplate;
pub use session::{
    entities::{ExchangeKind, MessagePart, Role},
    state::SessionState,
};
pub use util::{preview, truncate_str};
