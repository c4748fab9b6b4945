//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Diagram image is empty")]
    EmptyImage,

    #[error("Diagram image is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),
}

impl DomainError {
    /// Whether the error comes from the diagram payload (as opposed to chat input)
    pub fn is_image_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyImage
                | DomainError::ImageTooLarge { .. }
                | DomainError::UnsupportedMediaType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_display() {
        let error = DomainError::ImageTooLarge {
            size: 11,
            limit: 10,
        };
        assert_eq!(
            error.to_string(),
            "Diagram image is 11 bytes, limit is 10 bytes"
        );
    }

    #[test]
    fn test_is_image_error() {
        assert!(DomainError::EmptyImage.is_image_error());
        assert!(DomainError::UnsupportedMediaType("text/plain".into()).is_image_error());
        assert!(!DomainError::InvalidQuestion("".into()).is_image_error());
    }
}
