//! Immutable HTTP Message Toolkit
//!
//! Messages, uris, streams and uploaded files are immutable values, every `with_*` method
//! returns a new value sharing unchanged state with the receiver.
#![warn(missing_debug_implementations)]

mod log;
mod matches;
mod message;

pub mod uri;
pub mod http;
pub mod headers;
pub mod body;
pub mod upload;
pub mod request;
pub mod response;
pub mod factory;
pub mod error;

pub use uri::Uri;
pub use http::{Method, StatusCode, Version};
pub use headers::HeaderMap;
pub use body::Stream;
pub use upload::{FileTree, UploadStatus, UploadedFile};
pub use request::{Request, ServerRequest};
pub use response::{Emitter, Response};
pub use factory::{Globals, RequestFactory, ResponseFactory, ServerRequestFactory};
pub use error::{Error, ErrorKind, Result};
