use crate::{error::ErrorKind, upload::UploadError};

/// An error that can occur when normalizing a files specification.
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Scalar where a file or a group of files is expected.
    #[error("Invalid value in files specification")]
    InvalidSpec,
    /// Field of a nested specification not indexed like `tmp_name`.
    #[error("Diverging keys in files specification field \"{0}\"")]
    ParallelKeys(&'static str),
    #[error(transparent)]
    Status(#[from] UploadError),
}

impl FilesError {
    /// Returns the error category.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSpec | Self::ParallelKeys(_) => ErrorKind::InvalidArgument,
            Self::Status(err) => err.kind(),
        }
    }
}
