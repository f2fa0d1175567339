//! Image files posted by the back-office forms before they reach the
//! remote image host.

use thiserror::Error;

/// Largest image accepted by the upload flow, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5_242_880;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("file too large")]
    FileTooLarge,

    #[error("upload failed")]
    Failed,
}

/// Rejects files above `max_bytes` without reading them.
pub fn check_size(size: u64, max_bytes: u64) -> Result<(), UploadError> {
    if size > max_bytes {
        Err(UploadError::FileTooLarge)
    } else {
        Ok(())
    }
}

/// An image read into memory and ready to be sent as multipart field `image`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self, UploadError> {
        check_size(bytes.len() as u64, max_bytes)?;
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
