use crate::error::ErrorKind;

/// A possible error value when parsing or building [`Uri`].
///
/// [`Uri`]: super::Uri
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    /// Input cannot be decomposed into URI components.
    #[error("Unable to parse URI")]
    Parse,
    /// Scheme other than `http` or `https`.
    #[error("Invalid HTTP scheme \"{0}\" provided")]
    Scheme(String),
    /// Port outside `1..=65535`.
    #[error("Invalid HTTP port \"{0}\". Must be between 1 and 65535")]
    Port(u32),
}

impl UriError {
    /// Returns the error category.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse => ErrorKind::Parse,
            Self::Scheme(_) | Self::Port(_) => ErrorKind::InvalidArgument,
        }
    }
}
