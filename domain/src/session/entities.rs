//! Session domain entities

use crate::diagram::image::DiagramImage;
use crate::diagram::media_type::MediaType;
use serde::{Deserialize, Serialize};

/// Role of a turn in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One part of a message sent to the model.
///
/// The seeding turn carries an image part followed by a text part; every
/// later turn is a single text part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    /// Inline binary data tagged with its media type
    InlineData {
        media_type: MediaType,
        data: Vec<u8>,
    },
    /// Plain text
    Text(String),
}

impl MessagePart {
    pub fn text(content: impl Into<String>) -> Self {
        MessagePart::Text(content.into())
    }

    pub fn image(image: DiagramImage) -> Self {
        let (data, media_type) = image.into_parts();
        MessagePart::InlineData { media_type, data }
    }

    /// Returns the text if this is a `Text` part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text(s) => Some(s),
            MessagePart::InlineData { .. } => None,
        }
    }

    pub fn is_inline_data(&self) -> bool {
        matches!(self, MessagePart::InlineData { .. })
    }
}

/// Which kind of exchange a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeKind {
    /// First turn: image + analysis instruction
    Seeding,
    /// Any later text-only turn
    FollowUp,
}

impl ExchangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeKind::Seeding => "seeding",
            ExchangeKind::FollowUp => "follow_up",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_part_takes_payload() {
        let image = DiagramImage::new(vec![7, 8, 9], MediaType::Png).unwrap();
        let part = MessagePart::image(image);
        assert!(part.is_inline_data());
        assert!(part.as_text().is_none());
        match part {
            MessagePart::InlineData { media_type, data } => {
                assert_eq!(media_type, MediaType::Png);
                assert_eq!(data, vec![7, 8, 9]);
            }
            MessagePart::Text(_) => panic!("expected inline data"),
        }
    }

    #[test]
    fn test_text_part() {
        let part = MessagePart::text("What does V-203 do?");
        assert_eq!(part.as_text(), Some("What does V-203 do?"));
        assert!(!part.is_inline_data());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }
}
