use std::io;

use crate::{body::StreamError, error::ErrorKind};

/// An error that can occur in [`UploadedFile`] operations.
///
/// [`UploadedFile`]: super::UploadedFile
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Upload status outside `0..=8`.
    #[error("Invalid error status for UploadedFile")]
    Status(i64),
    /// Empty move target.
    #[error("Invalid path provided for move operation; must be a non-empty string")]
    InvalidPath,
    /// Upload finished with an error status.
    #[error("Cannot retrieve stream due to upload error")]
    Upload,
    /// File already moved.
    #[error("Cannot retrieve stream after it has already been moved")]
    Moved,
    /// Rename, copy or target write failed.
    #[error("Uploaded file could not be moved to \"{path}\"")]
    MoveFailed {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl UploadError {
    /// Returns the error category.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Status(_) | Self::InvalidPath => ErrorKind::InvalidArgument,
            Self::Stream(err) => err.kind(),
            Self::Upload | Self::Moved | Self::MoveFailed { .. } => ErrorKind::Runtime,
        }
    }
}
