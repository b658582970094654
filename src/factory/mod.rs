//! Message factories.
//!
//! [`ServerRequestFactory`] builds a [`ServerRequest`] from a [`Globals`] snapshot of the server
//! environment.
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{borrow::Cow, io};

use crate::{
    body::Stream,
    error::Result,
    headers::HeaderMap,
    http::{Method, StatusCode, Version},
    log::{debug, warning},
    request::{Request, ServerRequest},
    response::Response,
    uri::Uri,
};

mod error;
mod files;


pub use error::FilesError;
pub use files::FileSpec;

/// Creates client [`Request`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFactory;

impl RequestFactory {
    /// Create [`Request`] from method and uri string.
    ///
    /// # Errors
    ///
    /// Returns error if the method is not a token or the uri cannot be parsed.
    pub fn create_request(&self, method: &str, uri: &str) -> Result<Request> {
        self.create_request_with_uri(method, Uri::parse(uri)?)
    }

    /// Create [`Request`] from method and an existing [`Uri`].
    ///
    /// # Errors
    ///
    /// Returns error if the method is not a token.
    pub fn create_request_with_uri(&self, method: &str, uri: Uri) -> Result<Request> {
        Ok(Request::new(Method::parse(method)?, uri))
    }
}

/// Creates [`Response`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFactory;

impl ResponseFactory {
    /// Create [`Response`] with the standard reason phrase of `code`.
    ///
    /// # Errors
    ///
    /// Returns error if the code is outside `100..=599`.
    pub fn create_response(&self, code: u16) -> Result<Response> {
        Ok(Response::new(StatusCode::from_u16(code)?))
    }
}

/// Snapshot of the server environment a request is received in.
#[derive(Debug, Default)]
pub struct Globals {
    /// Server and execution environment, e.g: `REQUEST_METHOD`, `HTTP_HOST`.
    pub server: Map<String, Value>,
    /// Decoded query string.
    pub query: Map<String, Value>,
    /// Decoded form body.
    pub post: Map<String, Value>,
    pub cookies: Map<String, Value>,
    pub files: IndexMap<String, FileSpec>,
    /// Request headers, derived from `server` when empty.
    pub headers: Vec<(String, String)>,
    /// Request body, an empty read only stream when absent.
    pub body: Option<Stream>,
}

/// Creates [`ServerRequest`]s from [`Globals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerRequestFactory;

impl ServerRequestFactory {
    /// Create [`ServerRequest`] from [`Globals`].
    ///
    /// - method from `REQUEST_METHOD`, defaults to `GET`
    /// - protocol version from `SERVER_PROTOCOL` without the `HTTP/` prefix, defaults to `1.1`
    /// - uri from `HTTPS`, `HTTP_HOST` or `SERVER_NAME`, `SERVER_PORT` and `REQUEST_URI`
    ///
    /// # Errors
    ///
    /// Returns error if any of the above is invalid, or the files specification cannot be
    /// normalized.
    pub fn from_globals(&self, globals: Globals) -> Result<ServerRequest> {
        let Globals { server, query, post, cookies, files, headers, body } = globals;

        let method = match server_str(&server, "REQUEST_METHOD") {
            Some(method) => Method::parse(&method)?,
            None => Method::GET,
        };
        let version = match server_str(&server, "SERVER_PROTOCOL") {
            Some(protocol) => Version::parse(&protocol.replace("HTTP/", ""))?,
            None => Version::HTTP_11,
        };
        let uri = uri_from_server(&server)?;

        let headers = if headers.is_empty() {
            headers_from_server(&server)
        } else {
            headers.into_iter().collect()
        };

        let files = match files::normalize(files) {
            Ok(ok) => ok,
            Err(err) => {
                warning!("rejected files specification: {err}");
                return Err(err.into());
            }
        };

        debug!("server request from globals: {method} {uri}");

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .version(version)
            .headers(&headers)
            .body(body.unwrap_or_else(|| Stream::input(io::empty())))
            .build();

        Ok(ServerRequest::from_request(request, server)
            .with_query_params(query)
            .with_cookie_params(cookies)
            .with_parsed_body(Value::Object(post))
            .with_uploaded_files(files))
    }
}

/// String or number server entry, `null` is treated as absent.
fn server_str<'a>(server: &'a Map<String, Value>, key: &str) -> Option<Cow<'a, str>> {
    match server.get(key)? {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn uri_from_server(server: &Map<String, Value>) -> Result<Uri> {
    let https = server_str(server, "HTTPS").is_some_and(|https| https == "on");
    let scheme = if https { "https" } else { "http" };

    let host = server_str(server, "HTTP_HOST")
        .or_else(|| server_str(server, "SERVER_NAME"))
        .unwrap_or(Cow::Borrowed("localhost"));

    let (host, port) = match split_port(&host) {
        Some((host, port)) => (host, Cow::Borrowed(port)),
        None => {
            let port = server_str(server, "SERVER_PORT")
                .unwrap_or(Cow::Borrowed(if https { "443" } else { "80" }));
            (host.as_ref(), port)
        }
    };

    let target = server_str(server, "REQUEST_URI").unwrap_or_default();
    Ok(Uri::parse(&format!("{scheme}://{host}:{port}{target}"))?)
}

/// Split a trailing `:digits` off the host.
fn split_port(host: &str) -> Option<(&str, &str)> {
    let (host, port) = host.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((host, port))
}

/// `HTTP_ACCEPT_LANGUAGE` becomes `Accept-Language`, `CONTENT_TYPE` and `CONTENT_LENGTH` are
/// included.
fn headers_from_server(server: &Map<String, Value>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for key in server.keys() {
        let name = match key.strip_prefix("HTTP_") {
            Some(name) => name,
            None if key == "CONTENT_TYPE" || key == "CONTENT_LENGTH" => key,
            None => continue,
        };
        if let Some(value) = server_str(server, key) {
            headers.append(&header_name(name), value.into_owned());
        }
    }
    headers
}

fn header_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for (i, word) in key.split('_').enumerate() {
        if i != 0 {
            name.push('-');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    name
}
