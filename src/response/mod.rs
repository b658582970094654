//! HTTP Response
use std::rc::Rc;

use crate::{
    body::Stream,
    headers::{HeaderMap, IntoHeaderValues},
    http::{MessageError, StatusCode, Version},
    message::{MessageCore, message_impl},
};

mod emit;


pub use emit::Emitter;

/// HTTP Response Parts.
#[derive(Debug, Clone, PartialEq)]
struct Parts {
    core: MessageCore,
    status: StatusCode,
    reason: String,
}

/// HTTP Response.
///
/// `Response` is immutable, every `with_*` method returns a new value.
#[derive(Debug, Clone)]
pub struct Response {
    parts: Rc<Parts>,
}

impl Response {
    /// Create [`Response`] with the standard reason phrase of `status`.
    #[inline]
    pub fn new(status: StatusCode) -> Self {
        Self::builder().status(status).build()
    }

    /// Returns a [`Builder`] for a `200 OK` response.
    #[inline]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns `true` if both values share the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.parts, &other.parts)
    }

    message_impl!();

    #[inline]
    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    /// Returns the reason phrase, empty if the code is not registered and none was given.
    #[inline]
    pub fn reason_phrase(&self) -> &str {
        &self.parts.reason
    }

    /// Returns a response with the given status code and reason phrase.
    ///
    /// An empty or absent reason resolves to the standard phrase of the code.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Status`] if the code is outside `100..=599`.
    pub fn with_status(&self, code: u16, reason: Option<&str>) -> Result<Self, MessageError> {
        let status = StatusCode::from_u16(code)?;
        let reason = resolve_reason(status, reason);
        if self.parts.status == status && self.parts.reason == reason {
            return Ok(self.clone());
        }
        Ok(self.update(|parts| {
            parts.status = status;
            parts.reason = reason;
        }))
    }

    #[inline]
    fn core(&self) -> &MessageCore {
        &self.parts.core
    }

    #[inline]
    fn with_core(&self, f: impl FnOnce(&mut MessageCore)) -> Self {
        self.update(|parts| f(&mut parts.core))
    }

    fn update(&self, f: impl FnOnce(&mut Parts)) -> Self {
        let mut parts = Rc::clone(&self.parts);
        f(Rc::make_mut(&mut parts));
        Self { parts }
    }
}

impl Default for Response {
    #[inline]
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.parts == other.parts
    }
}

fn resolve_reason(status: StatusCode, reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => reason.to_owned(),
        _ => status.message().unwrap_or_default().to_owned(),
    }
}

// ===== Builder =====

/// [`Response`] builder.
#[derive(Debug, Default)]
pub struct Builder {
    status: StatusCode,
    reason: Option<String>,
    version: Version,
    headers: HeaderMap,
    body: Option<Stream>,
}

impl Builder {
    /// Sets the status code, defaults to `200 OK`.
    #[inline]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Sets the reason phrase, defaults to the standard phrase of the status code.
    #[inline]
    pub fn reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the protocol version, defaults to HTTP/1.1.
    #[inline]
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Add a header, merged under the first seen casing of the same name.
    #[inline]
    pub fn header<V: IntoHeaderValues>(mut self, name: &str, values: V) -> Self {
        self.headers.append(name, values);
        self
    }

    /// Add multiple headers, merged under the first seen casing of the same name.
    #[inline]
    pub fn headers<N, V, I>(mut self, headers: I) -> Self
    where
        N: AsRef<str>,
        V: IntoHeaderValues,
        I: IntoIterator<Item = (N, V)>,
    {
        self.headers.extend(headers);
        self
    }

    /// Sets the body, defaults to [`Stream::temp`].
    #[inline]
    pub fn body(mut self, body: Stream) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Response {
        let Self { status, reason, version, headers, body } = self;
        Response {
            parts: Rc::new(Parts {
                core: MessageCore {
                    headers,
                    version,
                    body: body.unwrap_or_else(Stream::temp),
                },
                status,
                reason: resolve_reason(status, reason.as_deref()),
            }),
        }
    }
}
