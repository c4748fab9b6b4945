//! Load a P&ID image file from disk

use pid_domain::{DiagramImage, DomainError, MAX_IMAGE_BYTES, MediaType};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Reasons a file is refused before any model call.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("File size exceeds 10MB limit.")]
    TooLarge { size: u64 },

    #[error("Please upload a valid image file (JPEG, PNG, WebP).")]
    NotAnImage,

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<DomainError> for IntakeError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::ImageTooLarge { size, .. } => IntakeError::TooLarge { size: size as u64 },
            _ => IntakeError::NotAnImage,
        }
    }
}

/// Read `path` and validate it as a diagram image.
///
/// The size limit is checked against file metadata before reading. The
/// media type comes from the leading bytes, falling back to the extension.
pub fn load_diagram(path: impl AsRef<Path>) -> Result<DiagramImage, IntakeError> {
    let path = path.as_ref();
    let io_error = |source| IntakeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_error)?.len();
    if size > MAX_IMAGE_BYTES as u64 {
        return Err(IntakeError::TooLarge { size });
    }

    let bytes = std::fs::read(path).map_err(io_error)?;
    let media_type = MediaType::sniff(&bytes)
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(MediaType::from_extension)
        })
        .ok_or(IntakeError::NotAnImage)?;

    debug!(
        path = %path.display(),
        media_type = %media_type,
        bytes = bytes.len(),
        "Loaded diagram"
    );

    Ok(DiagramImage::new(bytes, media_type)?)
}
