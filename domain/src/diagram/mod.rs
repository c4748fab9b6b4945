//! Uploaded diagram payloads.
//!
//! - [`image::DiagramImage`]: validated image bytes plus media type
//! - [`media_type::MediaType`]: `image/*` media types, with sniffing helpers

pub mod image;
pub mod media_type;
