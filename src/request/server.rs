use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::rc::Rc;

use super::Request;
use crate::{
    http::{MessageError, Method},
    message::{MessageCore, message_impl},
    upload::FileTree,
    uri::Uri,
};

#[derive(Debug, Clone, PartialEq)]
struct ServerParts {
    server: Map<String, Value>,
    cookies: Map<String, Value>,
    query: Map<String, Value>,
    files: IndexMap<String, FileTree>,
    parsed_body: Value,
    attributes: Map<String, Value>,
}

/// HTTP Request as received by the server.
///
/// Carries the server environment, cookies, query, uploaded files, parsed body and
/// application attributes on top of [`Request`].
#[derive(Debug, Clone)]
pub struct ServerRequest {
    request: Request,
    server: Rc<ServerParts>,
}

impl ServerRequest {
    /// Create [`ServerRequest`] with empty params and a temporary body.
    #[inline]
    pub fn new(method: Method, uri: Uri, server_params: Map<String, Value>) -> Self {
        Self::from_request(Request::new(method, uri), server_params)
    }

    /// Create [`ServerRequest`] from [`Request`].
    pub fn from_request(request: Request, server_params: Map<String, Value>) -> Self {
        Self {
            request,
            server: Rc::new(ServerParts {
                server: server_params,
                cookies: Map::new(),
                query: Map::new(),
                files: IndexMap::new(),
                parsed_body: Value::Null,
                attributes: Map::new(),
            }),
        }
    }

    /// Returns `true` if both values share the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.request.ptr_eq(&other.request) && Rc::ptr_eq(&self.server, &other.server)
    }

    /// Returns the underlying [`Request`].
    #[inline]
    pub fn as_request(&self) -> &Request {
        &self.request
    }

    message_impl!();

    delegate! {
        #[inline]
        pub fn method(&self) -> &Method;
        #[inline]
        pub fn uri(&self) -> &Uri;
        pub fn request_target(&self) -> String;
    }

    delegate! {
        /// Returns a request with the given method, see [`Request::with_method`].
        pub fn with_method(&self, method: &str) -> Result<Self, MessageError>;
        /// Returns a request with an explicit request target, see
        /// [`Request::with_request_target`].
        pub fn with_request_target(&self, target: &str) -> Result<Self, MessageError>;
    }

    /// Returns a request with the given uri, see [`Request::with_uri`].
    #[inline]
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        self.with_request(self.request.with_uri(uri, preserve_host))
    }

    #[inline]
    pub fn server_params(&self) -> &Map<String, Value> {
        &self.server.server
    }

    #[inline]
    pub fn cookie_params(&self) -> &Map<String, Value> {
        &self.server.cookies
    }

    pub fn with_cookie_params(&self, cookies: Map<String, Value>) -> Self {
        self.update(|parts| parts.cookies = cookies)
    }

    #[inline]
    pub fn query_params(&self) -> &Map<String, Value> {
        &self.server.query
    }

    pub fn with_query_params(&self, query: Map<String, Value>) -> Self {
        self.update(|parts| parts.query = query)
    }

    #[inline]
    pub fn uploaded_files(&self) -> &IndexMap<String, FileTree> {
        &self.server.files
    }

    pub fn with_uploaded_files(&self, files: IndexMap<String, FileTree>) -> Self {
        self.update(|parts| parts.files = files)
    }

    /// Returns the deserialized body, [`Value::Null`] if none.
    #[inline]
    pub fn parsed_body(&self) -> &Value {
        &self.server.parsed_body
    }

    pub fn with_parsed_body(&self, parsed_body: Value) -> Self {
        self.update(|parts| parts.parsed_body = parsed_body)
    }

    #[inline]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.server.attributes
    }

    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.server.attributes.get(name)
    }

    /// Returns the attribute, or `default` if the name is absent.
    ///
    /// A stored [`Value::Null`] is returned as is.
    #[inline]
    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.attribute(name).unwrap_or(default)
    }

    pub fn with_attribute(&self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.update(|parts| {
            parts.attributes.insert(name.to_owned(), value);
        })
    }

    pub fn without_attribute(&self, name: &str) -> Self {
        self.update(|parts| {
            parts.attributes.shift_remove(name);
        })
    }

    #[inline]
    fn core(&self) -> &MessageCore {
        self.request.core()
    }

    #[inline]
    fn with_core(&self, f: impl FnOnce(&mut MessageCore)) -> Self {
        self.with_request(self.request.with_core(f))
    }

    fn with_request(&self, request: Request) -> Self {
        if request.ptr_eq(&self.request) {
            return self.clone();
        }
        Self {
            request,
            server: Rc::clone(&self.server),
        }
    }

    fn update(&self, f: impl FnOnce(&mut ServerParts)) -> Self {
        let mut server = Rc::clone(&self.server);
        f(Rc::make_mut(&mut server));
        Self {
            request: self.request.clone(),
            server,
        }
    }
}

impl PartialEq for ServerRequest {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.request == other.request && self.server == other.server)
    }
}

impl From<ServerRequest> for Request {
    #[inline]
    fn from(value: ServerRequest) -> Self {
        value.request
    }
}

// ===== Macros =====

macro_rules! delegate {
    (
        $(
            $(#[$doc:meta])*
            pub fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> Result<Self, $err:ty>;
        )*
    ) => {
        $(
            $(#[$doc])*
            pub fn $name(&self $(, $arg: $ty)*) -> Result<Self, $err> {
                Ok(self.with_request(self.request.$name($($arg),*)?))
            }
        )*
    };
    (
        $(
            $(#[$doc:meta])*
            pub fn $name:ident(&self) -> $ret:ty;
        )*
    ) => {
        $(
            $(#[$doc])*
            pub fn $name(&self) -> $ret {
                self.request.$name()
            }
        )*
    };
}

use delegate;
