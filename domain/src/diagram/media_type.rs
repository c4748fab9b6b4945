//! Media type value object for uploaded diagrams

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declared media type of a diagram image (Value Object)
///
/// Only `image/*` types can be represented. Well-known formats get their own
/// variant; anything else under `image/` is kept as [`MediaType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
    Gif,
    Heic,
    Heif,
    /// Any other `image/*` subtype, stored lowercase (e.g. "image/bmp")
    Other(String),
}

impl MediaType {
    /// MIME string sent on the wire
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Webp => "image/webp",
            MediaType::Gif => "image/gif",
            MediaType::Heic => "image/heic",
            MediaType::Heif => "image/heif",
            MediaType::Other(s) => s,
        }
    }

    /// Parse a MIME string; anything outside `image/*` is rejected.
    pub fn parse(mime: &str) -> Result<Self, DomainError> {
        // Drop parameters such as "; charset=binary"
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        let Some(subtype) = essence.strip_prefix("image/") else {
            return Err(DomainError::UnsupportedMediaType(mime.to_string()));
        };
        if subtype.is_empty() {
            return Err(DomainError::UnsupportedMediaType(mime.to_string()));
        }
        Ok(match subtype {
            "png" => MediaType::Png,
            "jpeg" | "jpg" | "pjpeg" => MediaType::Jpeg,
            "webp" => MediaType::Webp,
            "gif" => MediaType::Gif,
            "heic" => MediaType::Heic,
            "heif" => MediaType::Heif,
            _ => MediaType::Other(essence),
        })
    }

    /// Guess the media type from a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" | "jpe" => Some(MediaType::Jpeg),
            "webp" => Some(MediaType::Webp),
            "gif" => Some(MediaType::Gif),
            "heic" => Some(MediaType::Heic),
            "heif" => Some(MediaType::Heif),
            "bmp" => Some(MediaType::Other("image/bmp".to_string())),
            "tif" | "tiff" => Some(MediaType::Other("image/tiff".to_string())),
            "svg" => Some(MediaType::Other("image/svg+xml".to_string())),
            _ => None,
        }
    }

    /// Detect the media type from leading magic bytes
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
        if bytes.starts_with(PNG) {
            return Some(MediaType::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(MediaType::Jpeg);
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some(MediaType::Gif);
        }
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(MediaType::Webp);
        }
        if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
            return match &bytes[8..12] {
                b"heic" | b"heix" | b"hevc" | b"hevx" => Some(MediaType::Heic),
                b"mif1" | b"msf1" => Some(MediaType::Heif),
                _ => None,
            };
        }
        if bytes.starts_with(b"BM") {
            return Some(MediaType::Other("image/bmp".to_string()));
        }
        None
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::parse(s)
    }
}

impl Serialize for MediaType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MediaType::parse(&s).map_err(serde::de::Error::custom)
    }
}
