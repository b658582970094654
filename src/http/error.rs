use crate::error::ErrorKind;

/// An error that can occur when validating message components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    /// Method is not a token.
    #[error("Invalid HTTP method \"{0}\" provided")]
    Method(String),
    /// Protocol version outside `[1-2].[0-1]`.
    #[error("Invalid HTTP version protocol \"{0}\" provided")]
    Version(String),
    /// Status code outside `100..=599`.
    #[error("Invalid HTTP status code \"{0}\" provided")]
    Status(u16),
    /// Request target containing whitespace.
    #[error("Invalid request target provided; cannot contain whitespace")]
    RequestTarget,
}

impl MessageError {
    /// Returns the error category, always [`ErrorKind::InvalidArgument`].
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
