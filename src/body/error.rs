use std::io;

use crate::error::ErrorKind;

/// An error that can occur in [`Stream`] operations.
///
/// [`Stream`]: super::Stream
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Open mode not understood.
    #[error("Invalid stream mode \"{0}\" provided")]
    Mode(String),
    /// File cannot be opened.
    #[error("Unable to open \"{path}\"")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Stream detached or position unavailable.
    #[error("Unable to determine stream position")]
    Position(#[source] Option<io::Error>),
    /// Stream not seekable or seek failed.
    #[error("Unable to seek to stream position {offset} with whence {whence}")]
    Seek {
        offset: i64,
        whence: &'static str,
    },
    /// Stream not writable or write failed.
    #[error("Unable to write to stream")]
    Write(#[source] Option<io::Error>),
    /// Stream not readable.
    #[error("Cannot read from non-readable stream")]
    NotReadable,
    /// Read failed.
    #[error("Unable to read from stream")]
    Read(#[source] io::Error),
    /// Stream not readable or reading the remaining contents failed.
    #[error("Unable to get stream contents")]
    Contents(#[source] Option<io::Error>),
}

impl StreamError {
    /// Returns the error category.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Mode(_) => ErrorKind::InvalidArgument,
            _ => ErrorKind::Runtime,
        }
    }
}
