//! Input: the image handed to the pipeline and its declared MIME type.
//!
//! An [`ItemImage`] is either bytes already in memory (an upload buffer) or a
//! path whose contents are read when the encode stage runs. The MIME type is
//! carried verbatim into the request; the pipeline never second-guesses it.
//!
//! [`ItemImage::open`] plays the role of a file picker: it only admits PNG,
//! JPEG and WEBP files, inferring the type from the extension and falling back
//! to the file's magic bytes.

use crate::error::ListerError;
use image::ImageFormat;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Image formats a picker should offer.
pub const ACCEPTED_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Bytes already in memory.
    Bytes(Vec<u8>),
    /// A file read in full at encode time.
    File(PathBuf),
}

/// An image plus its declared MIME type, immutable for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemImage {
    source: ImageSource,
    mime_type: String,
}

impl ItemImage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Bytes(bytes.into()),
            mime_type: mime_type.into(),
        }
    }

    /// Reference a file without reading it yet.
    pub fn from_file(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        Self {
            source: ImageSource::File(path.into()),
            mime_type: mime_type.into(),
        }
    }

    /// Admit a file from disk if it is a PNG, JPEG or WEBP image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ListerError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ListerError::ImageNotFound {
                path: path.to_path_buf(),
            });
        }

        // A recognised extension decides; only unknown ones fall back to sniffing.
        let mime = match ImageFormat::from_path(path) {
            Ok(format) => accepted_mime(format).ok_or_else(|| ListerError::UnsupportedImageType {
                path: path.to_path_buf(),
            })?,
            Err(_) => sniff_mime(path)?,
        };
        debug!("Accepted {} as {}", path.display(), mime);
        Ok(Self::from_file(path, mime))
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// MIME type for an accepted image format, `None` for everything else.
pub fn accepted_mime(format: ImageFormat) -> Option<&'static str> {
    ACCEPTED_FORMATS
        .contains(&format)
        .then(|| format.to_mime_type())
}

/// Read the first bytes of the file and recognise the format from its signature.
fn sniff_mime(path: &Path) -> Result<&'static str, ListerError> {
    let unsupported = || ListerError::UnsupportedImageType {
        path: path.to_path_buf(),
    };

    let mut head = Vec::with_capacity(16);
    std::fs::File::open(path)
        .and_then(|f| f.take(16).read_to_end(&mut head))
        .map_err(|source| ListerError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

    image::guess_format(&head)
        .ok()
        .and_then(accepted_mime)
        .ok_or_else(unsupported)
}
