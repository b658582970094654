//! State shared by every HTTP message.
//!
//! [`Request`], [`ServerRequest`] and [`Response`] embed a [`MessageCore`] and expose the same
//! header, body and protocol version accessors.
//!
//! [`Request`]: crate::request::Request
//! [`ServerRequest`]: crate::request::ServerRequest
//! [`Response`]: crate::response::Response
use crate::{body::Stream, headers::HeaderMap, http::Version};

/// Headers, protocol version and body of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageCore {
    pub headers: HeaderMap,
    pub version: Version,
    pub body: Stream,
}

impl MessageCore {
    /// Create [`MessageCore`] with HTTP/1.1 and given body.
    #[inline]
    pub fn new(body: Stream) -> Self {
        Self {
            headers: HeaderMap::new(),
            version: Version::HTTP_11,
            body,
        }
    }
}

impl Default for MessageCore {
    /// Empty headers, HTTP/1.1 and a temporary body.
    #[inline]
    fn default() -> Self {
        Self::new(Stream::temp())
    }
}

// ===== Macros =====

/// Generate message accessors and immutable builders.
///
/// The implementing type provides `fn core(&self) -> &MessageCore` and
/// `fn with_core(&self, f: impl FnOnce(&mut MessageCore)) -> Self`, the latter must leave the
/// receiver untouched.
macro_rules! message_impl {
    () => {
        /// Returns the protocol version number, e.g: `1.1`.
        #[inline]
        pub fn protocol_version(&self) -> &'static str {
            self.core().version.protocol()
        }

        /// Returns the protocol [`Version`][crate::http::Version].
        #[inline]
        pub fn version(&self) -> $crate::http::Version {
            self.core().version
        }

        /// Returns a message with the given protocol version, e.g: `1.0`.
        ///
        /// # Errors
        ///
        /// Returns [`MessageError::Version`][crate::http::MessageError::Version] if the version
        /// is not one of `1.0`, `1.1`, `2.0` or `2.1`.
        pub fn with_protocol_version(&self, version: &str) -> Result<Self, $crate::http::MessageError> {
            let version = $crate::http::Version::parse(version)?;
            Ok(self.with_version(version))
        }

        /// Returns a message with the given protocol [`Version`][crate::http::Version].
        pub fn with_version(&self, version: $crate::http::Version) -> Self {
            if self.core().version == version {
                return self.clone();
            }
            self.with_core(|core| core.version = version)
        }

        /// Returns all headers.
        #[inline]
        pub fn headers(&self) -> &$crate::headers::HeaderMap {
            &self.core().headers
        }

        /// Returns `true` if the header exists, case-insensitively.
        #[inline]
        pub fn has_header(&self, name: &str) -> bool {
            self.core().headers.contains(name)
        }

        /// Returns all values of a header, empty if absent.
        #[inline]
        pub fn header(&self, name: &str) -> &[String] {
            self.core().headers.get(name)
        }

        /// Returns all values of a header joined by `,`, empty if absent.
        #[inline]
        pub fn header_line(&self, name: &str) -> String {
            self.core().headers.get_line(name)
        }

        /// Returns a message with the header replaced case-insensitively.
        ///
        /// The header is stored under the casing of `name`.
        pub fn with_header<V: $crate::headers::IntoHeaderValues>(&self, name: &str, values: V) -> Self {
            let values = $crate::headers::into_values(values);
            let headers = &self.core().headers;
            if headers.stored_name(name) == Some(name) && headers.get(name) == values.as_slice() {
                return self.clone();
            }
            self.with_core(|core| {
                core.headers.insert(name, values);
            })
        }

        /// Returns a message with values appended to the header.
        ///
        /// Existing header keeps its stored casing.
        pub fn with_added_header<V: $crate::headers::IntoHeaderValues>(&self, name: &str, values: V) -> Self {
            self.with_core(|core| core.headers.append(name, values))
        }

        /// Returns a message without the header, case-insensitively.
        pub fn without_header(&self, name: &str) -> Self {
            if !self.core().headers.contains(name) {
                return self.clone();
            }
            self.with_core(|core| {
                core.headers.remove(name);
            })
        }

        /// Returns the body stream.
        #[inline]
        pub fn body(&self) -> &$crate::body::Stream {
            &self.core().body
        }

        /// Returns a message with the given body stream.
        pub fn with_body(&self, body: $crate::body::Stream) -> Self {
            if self.core().body.ptr_eq(&body) {
                return self.clone();
            }
            self.with_core(|core| core.body = body)
        }
    };
}

pub(crate) use message_impl;
