//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the generative model a session talks to
//! - [`question::Question`]: a validated follow-up question
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
