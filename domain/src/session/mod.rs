//! Analysis session domain.
//!
//! - [`entities::MessagePart`]: image or text part of a turn
//! - [`entities::ExchangeKind`]: seeding vs. follow-up exchange
//! - [`state::SessionState`]: the Idle / Active lifecycle

pub mod entities;
pub mod state;
