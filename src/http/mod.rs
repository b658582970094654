//! HTTP Protocol.
mod method;
mod status;
mod version;
mod error;

pub use method::Method;
pub use version::Version;
pub use status::StatusCode;
pub use error::MessageError;
