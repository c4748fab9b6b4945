//! Prompt domain
//!
//! The fixed instructions that seed every diagram analysis session.

mod template;

pub use template::PidPromptTemplate;
