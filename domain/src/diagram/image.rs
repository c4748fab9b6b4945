//! Diagram image payload

use super::media_type::MediaType;
use crate::core::error::DomainError;

/// Largest diagram accepted for analysis (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// An uploaded P&ID image: raw bytes plus their declared media type.
///
/// Construction validates the payload, so anything holding a `DiagramImage`
/// can assume it is non-empty, at most [`MAX_IMAGE_BYTES`], and an image.
/// The payload is consumed once by the seeding exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct DiagramImage {
    bytes: Vec<u8>,
    media_type: MediaType,
}

impl DiagramImage {
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::EmptyImage);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::ImageTooLarge {
                size: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self { bytes, media_type })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u8>, MediaType) {
        (self.bytes, self.media_type)
    }
}

// Never dump the raw bytes into logs.
impl std::fmt::Debug for DiagramImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagramImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_image() {
        let image = DiagramImage::new(vec![1, 2, 3], MediaType::Png).unwrap();
        assert_eq!(image.len(), 3);
        assert_eq!(image.media_type(), &MediaType::Png);
        assert!(!image.is_empty());
    }

    #[test]
    fn test_empty_image_rejected() {
        assert_eq!(
            DiagramImage::new(Vec::new(), MediaType::Png),
            Err(DomainError::EmptyImage)
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(DiagramImage::new(vec![0; MAX_IMAGE_BYTES], MediaType::Jpeg).is_ok());
        let err = DiagramImage::new(vec![0; MAX_IMAGE_BYTES + 1], MediaType::Jpeg).unwrap_err();
        assert!(matches!(err, DomainError::ImageTooLarge { .. }));
    }

    #[test]
    fn test_debug_hides_bytes() {
        let image = DiagramImage::new(vec![42; 16], MediaType::Webp).unwrap();
        let debug = format!("{:?}", image);
        assert!(debug.contains("len: 16"));
        assert!(!debug.contains("42"));
    }
}
