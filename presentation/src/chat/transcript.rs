//! In-memory chat transcript for the current diagram

use chrono::{DateTime, Local};
use pid_domain::Role;
use serde::Serialize;

/// One displayed chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// Messages of the current session, oldest first.
///
/// Ids keep increasing across clears so a message is never confused with
/// one from an earlier diagram.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) -> &ChatMessage {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            role,
            text: text.into(),
            timestamp: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_across_clear() {
        let mut transcript = Transcript::new();
        transcript.push(Role::Model, "analysis");
        transcript.push(Role::User, "question");
        assert_eq!(transcript.len(), 2);

        transcript.clear();
        assert!(transcript.is_empty());

        let id = transcript.push(Role::Model, "new analysis").id;
        assert_eq!(id, 3);
    }

    #[test]
    fn test_serializes_role_lowercase() {
        let mut transcript = Transcript::new();
        transcript.push(Role::User, "What is P-101?");
        let value = serde_json::to_value(&transcript.messages()[0]).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["text"], "What is P-101?");
    }
}
