//! Image encoding: raw bytes → base64 [`InlineImage`].
//!
//! Multimodal APIs take images inline as base64 inside the JSON request body.
//! The bytes are sent as-is; no re-encoding, resizing or format conversion,
//! and the declared MIME type passes through unchanged.

use crate::pipeline::input::{ImageSource, ItemImage};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base64 payload plus MIME type, ready to embed in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    /// Standard-alphabet, padded base64.
    pub data: String,
}

impl InlineImage {
    /// Decode the payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Encode bytes already in memory.
pub fn encode_bytes(bytes: &[u8], mime_type: &str) -> InlineImage {
    let data = STANDARD.encode(bytes);
    debug!("Encoded image: {} bytes → {} bytes base64", bytes.len(), data.len());
    InlineImage {
        mime_type: mime_type.to_string(),
        data,
    }
}

/// Read the whole image and encode it.
///
/// The only failure is an I/O error while reading a file-backed image.
pub async fn encode_image(image: &ItemImage) -> Result<InlineImage, std::io::Error> {
    match image.source() {
        ImageSource::Bytes(bytes) => Ok(encode_bytes(bytes, image.mime_type())),
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(path).await?;
            Ok(encode_bytes(&bytes, image.mime_type()))
        }
    }
}
