//! Crate error type.
use crate::{
    body::StreamError, factory::FilesError, http::MessageError, upload::UploadError,
    uri::UriError,
};

/// Category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value supplied by the caller is rejected.
    InvalidArgument,
    /// An operation failed on otherwise valid input, e.g: io failure or a detached stream.
    Runtime,
    /// Input cannot be decomposed, e.g: a malformed uri.
    Parse,
}

/// Any error this crate can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Uri(#[from] UriError),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Files(#[from] FilesError),
}

impl Error {
    /// Returns the error category.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Uri(err) => err.kind(),
            Self::Message(err) => err.kind(),
            Self::Stream(err) => err.kind(),
            Self::Upload(err) => err.kind(),
            Self::Files(err) => err.kind(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
