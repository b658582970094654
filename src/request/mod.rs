//! HTTP Request
use std::rc::Rc;

use crate::{
    body::Stream,
    headers::{HeaderMap, IntoHeaderValues},
    http::{MessageError, Method, Version},
    message::{MessageCore, message_impl},
    uri::Uri,
};

mod server;

#[cfg(test)]
mod test;

pub use server::ServerRequest;

/// HTTP Request Parts.
#[derive(Debug, Clone, PartialEq)]
struct Parts {
    core: MessageCore,
    method: Method,
    /// explicit request target
    target: Option<String>,
    uri: Uri,
}

/// HTTP Request.
///
/// `Request` is immutable, every `with_*` method returns a new value. When the change is a no-op,
/// the returned value shares its allocation with the receiver, see [`Request::ptr_eq`].
#[derive(Debug, Clone)]
pub struct Request {
    parts: Rc<Parts>,
}

/// Constructor
impl Request {
    /// Create [`Request`] with empty headers and a temporary body.
    ///
    /// A `Host` header is derived from the uri when it has a host.
    #[inline]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self::builder().method(method).uri(uri).build()
    }

    /// Returns a [`Builder`] for a `GET` request to an empty uri.
    #[inline]
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl Request {
    /// Returns `true` if both values share the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.parts, &other.parts)
    }

    message_impl!();

    #[inline]
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    /// Returns a request with the given method, compared case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Method`] if the method is not a token.
    pub fn with_method(&self, method: &str) -> Result<Self, MessageError> {
        let method = Method::parse(method)?;
        if self.parts.method == method {
            return Ok(self.clone());
        }
        Ok(self.update(|parts| parts.method = method))
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Returns a request with the given uri.
    ///
    /// The `Host` header is derived from the new uri, unless `preserve_host` is `true` and a
    /// `Host` header already exists.
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        if self.parts.uri.ptr_eq(&uri) {
            return self.clone();
        }
        let update_host = !preserve_host || !self.has_header("host");
        self.update(|parts| {
            if update_host {
                update_host_from_uri(&mut parts.core.headers, &uri);
            }
            parts.uri = uri;
        })
    }

    /// Returns the explicit request target, or the uri path and query, e.g: `/over/there?q=1`.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.parts.target {
            return target.clone();
        }

        let uri = &self.parts.uri;
        let path = match uri.path() {
            "" => "/",
            path => path,
        };
        match uri.query() {
            "" => path.to_owned(),
            query => format!("{path}?{query}"),
        }
    }

    /// Returns a request with an explicit request target, e.g: `*` or an absolute form.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::RequestTarget`] if the target contains whitespace.
    pub fn with_request_target(&self, target: &str) -> Result<Self, MessageError> {
        if target.bytes().any(|b| b.is_ascii_whitespace() || b == b'\x0b') {
            return Err(MessageError::RequestTarget);
        }
        let target = target.to_owned();
        Ok(self.update(|parts| parts.target = Some(target)))
    }

    #[inline]
    pub(crate) fn core(&self) -> &MessageCore {
        &self.parts.core
    }

    #[inline]
    pub(crate) fn with_core(&self, f: impl FnOnce(&mut MessageCore)) -> Self {
        self.update(|parts| f(&mut parts.core))
    }

    fn update(&self, f: impl FnOnce(&mut Parts)) -> Self {
        let mut parts = Rc::clone(&self.parts);
        f(Rc::make_mut(&mut parts));
        Self { parts }
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.parts == other.parts
    }
}

/// Place `host[:port]` first, under the stored `host` casing or `Host`.
fn update_host_from_uri(headers: &mut HeaderMap, uri: &Uri) {
    let host = uri.host();
    if host.is_empty() {
        return;
    }

    let mut value = String::with_capacity(host.len() + 6);
    value.push_str(host);
    if let Some(port) = uri.port() {
        value.push(':');
        value.push_str(itoa::Buffer::new().format(port));
    }

    let name = headers.stored_name("host").unwrap_or("Host").to_owned();
    headers.insert_first(&name, value);
}

// ===== Builder =====

/// [`Request`] builder.
#[derive(Debug, Default)]
pub struct Builder {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    body: Option<Stream>,
}

impl Builder {
    /// Sets the method, defaults to `GET`.
    #[inline]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the uri, defaults to empty uri.
    #[inline]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
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

    /// Build the [`Request`].
    ///
    /// A `Host` header is derived from the uri when none is given.
    pub fn build(self) -> Request {
        let Self { method, uri, version, mut headers, body } = self;
        if !headers.contains("host") {
            update_host_from_uri(&mut headers, &uri);
        }
        Request {
            parts: Rc::new(Parts {
                core: MessageCore {
                    headers,
                    version,
                    body: body.unwrap_or_else(Stream::temp),
                },
                method,
                target: None,
                uri,
            }),
        }
    }
}
