use serde_json::{Map, Value, json};

use super::{Request, ServerRequest};
use crate::{
    body::Stream,
    error::ErrorKind,
    http::{Method, Version},
    upload::{FileTree, UploadStatus, UploadedFile},
    uri::Uri,
};

fn uri(value: &str) -> Uri {
    Uri::parse(value).unwrap()
}

fn request() -> Request {
    Request::new(Method::GET, Uri::new())
}

#[test]
fn test_defaults() {
    let req = request();
    assert_eq!(req.method(), "GET");
    assert_eq!(req.protocol_version(), "1.1");
    assert_eq!(req.request_target(), "/");
    assert!(req.headers().is_empty());
    assert_eq!(req.body().to_string(), "");
}

#[test]
fn test_protocol_version() {
    let req = request();
    let req2 = req.with_protocol_version("1.0").unwrap();
    assert_eq!(req2.protocol_version(), "1.0");
    assert_eq!(req2.version(), Version::HTTP_10);
    assert_eq!(req.protocol_version(), "1.1");
    assert!(req.with_protocol_version("1.1").unwrap().ptr_eq(&req));

    for invalid in ["", "1", "1.", "3.0", "1.1.1", "HTTP/1.1", "abc"] {
        let err = req.with_protocol_version(invalid).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid HTTP version protocol \"{invalid}\" provided"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_headers() {
    let req = request()
        .with_header("Content-Type", "text/html")
        .with_added_header("accept", ["text/plain", "application/json"]);

    assert!(req.has_header("CONTENT-TYPE"));
    assert_eq!(req.header("content-type"), ["text/html"]);
    assert_eq!(req.header_line("Accept"), "text/plain,application/json");
    assert!(req.header("missing").is_empty());
    assert_eq!(req.header_line("missing"), "");

    let req2 = req.with_added_header("ACCEPT", "text/xml");
    assert_eq!(req2.headers().stored_name("accept"), Some("accept"));
    assert_eq!(req2.header("accept").len(), 3);
    assert_eq!(req.header("accept").len(), 2);

    let req3 = req2.with_header("ACCEPT", "*/*");
    assert_eq!(req3.headers().stored_name("accept"), Some("ACCEPT"));
    assert_eq!(req3.header("Accept"), ["*/*"]);

    let req4 = req3.without_header("accept");
    assert!(!req4.has_header("Accept"));
    assert!(req3.has_header("Accept"));
}

#[test]
fn test_header_identity() {
    let req = request().with_header("X-Foo", ["a", "b"]);
    assert!(req.with_header("X-Foo", ["a", "b"]).ptr_eq(&req));
    assert!(!req.with_header("x-foo", ["a", "b"]).ptr_eq(&req));
    assert!(!req.with_header("X-Foo", "a").ptr_eq(&req));
    assert!(req.without_header("X-Bar").ptr_eq(&req));
}

#[test]
fn test_body() {
    let req = request();
    let body = Stream::memory("hello");
    let req2 = req.with_body(body.clone());
    assert!(req2.body().ptr_eq(&body));
    assert!(!req.body().ptr_eq(&body));
    assert!(req2.with_body(body).ptr_eq(&req2));
}

#[test]
fn test_method() {
    let req = request();
    let req2 = req.with_method("POST").unwrap();
    assert_eq!(req2.method(), "POST");
    assert_eq!(req.method(), "GET");
    assert!(req.with_method("GET").unwrap().ptr_eq(&req));

    let req3 = req.with_method("get").unwrap();
    assert_eq!(req3.method(), "get");
    assert!(!req3.ptr_eq(&req));

    for invalid in ["", "GET POST", "G\"ET", "(GET)"] {
        let err = req.with_method(invalid).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid HTTP method \"{invalid}\" provided"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_request_target() {
    let req = Request::new(Method::GET, uri("https://example.com/over/there?name=ferret#nose"));
    assert_eq!(req.request_target(), "/over/there?name=ferret");

    let req = Request::new(Method::GET, uri("https://example.com?q=1"));
    assert_eq!(req.request_target(), "/?q=1");

    let req2 = req.with_request_target("*").unwrap();
    assert_eq!(req2.request_target(), "*");
    assert_eq!(req.request_target(), "/?q=1");

    for invalid in ["/foo bar", "/foo\tbar", "/foo\nbar", "/foo\x0bbar"] {
        let err = req.with_request_target(invalid).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request target provided; cannot contain whitespace");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_host_from_uri() {
    let req = Request::builder()
        .uri(uri("http://example.com:8080/path"))
        .header("Accept", "*/*")
        .build();
    let names: Vec<_> = req.headers().iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Host", "Accept"]);
    assert_eq!(req.header_line("host"), "example.com:8080");

    let req = Request::new(Method::GET, uri("https://example.com:443"));
    assert_eq!(req.header_line("Host"), "example.com");

    let req = Request::new(Method::GET, uri("/path"));
    assert!(!req.has_header("Host"));
}

#[test]
fn test_explicit_host_is_kept() {
    let req = Request::builder()
        .uri(uri("http://example.com"))
        .header("host", "other.org")
        .build();
    assert_eq!(req.header("Host"), ["other.org"]);
    assert_eq!(req.headers().len(), 1);
}

#[test]
fn test_with_uri() {
    let req = Request::new(Method::GET, uri("http://example.com"));
    assert!(req.with_uri(req.uri().clone(), false).ptr_eq(&req));

    let req2 = req.with_uri(uri("http://foo.org:8000/a"), false);
    assert_eq!(req2.header_line("Host"), "foo.org:8000");
    assert_eq!(req2.uri().path(), "/a");
    assert_eq!(req.header_line("Host"), "example.com");

    let req3 = req.with_uri(uri("http://foo.org/"), true);
    assert_eq!(req3.header_line("Host"), "example.com");

    let bare = request().with_header("X-Foo", "bar");
    let req4 = bare.with_uri(uri("http://foo.org/"), true);
    let names: Vec<_> = req4.headers().iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Host", "X-Foo"]);

    let lower = req.with_header("host", "example.com");
    let req5 = lower.with_uri(uri("http://bar.net"), false);
    assert_eq!(req5.headers().stored_name("HOST"), Some("host"));
    assert_eq!(req5.header("Host"), ["bar.net"]);

    let req6 = req.with_uri(uri("/relative"), false);
    assert_eq!(req6.header_line("Host"), "example.com");
}

#[test]
fn test_builder() {
    let body = Stream::memory("{}");
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri("http://example.com/api"))
        .version(Version::HTTP_20)
        .headers([("Content-Type", "application/json"), ("content-type", "charset=utf-8")])
        .body(body.clone())
        .build();

    assert_eq!(req.method(), &Method::POST);
    assert_eq!(req.protocol_version(), "2.0");
    assert_eq!(req.header_line("CONTENT-TYPE"), "application/json,charset=utf-8");
    assert_eq!(req.headers().stored_name("content-type"), Some("Content-Type"));
    assert!(req.body().ptr_eq(&body));
}

// ===== ServerRequest =====

fn server_request() -> ServerRequest {
    let mut server = Map::new();
    server.insert("SERVER_NAME".into(), json!("example.com"));
    ServerRequest::new(Method::GET, uri("http://example.com/"), server)
}

#[test]
fn test_server_params() {
    let req = server_request();
    assert_eq!(req.server_params()["SERVER_NAME"], "example.com");
    assert!(req.cookie_params().is_empty());
    assert!(req.query_params().is_empty());
    assert!(req.uploaded_files().is_empty());
    assert!(req.parsed_body().is_null());
    assert!(req.attributes().is_empty());
}

#[test]
fn test_server_params_builders() {
    let req = server_request();

    let Value::Object(cookies) = json!({"session": "abc"}) else { unreachable!() };
    let req2 = req.with_cookie_params(cookies.clone());
    assert_eq!(req2.cookie_params(), &cookies);
    assert!(req.cookie_params().is_empty());

    let Value::Object(query) = json!({"page": "2", "tags": ["a", "b"]}) else { unreachable!() };
    let req3 = req.with_query_params(query.clone());
    assert_eq!(req3.query_params(), &query);

    let req4 = req.with_parsed_body(json!({"name": "ferret"}));
    assert_eq!(req4.parsed_body()["name"], "ferret");
    assert!(req.parsed_body().is_null());

    let file = UploadedFile::new(Stream::memory("x"), 1, UploadStatus::OK, None, None);
    let files = [("avatar".to_owned(), FileTree::from(file.clone()))].into_iter().collect();
    let req5 = req.with_uploaded_files(files);
    assert_eq!(req5.uploaded_files()["avatar"].as_file(), Some(&file));
    assert!(req.uploaded_files().is_empty());
}

#[test]
fn test_attributes() {
    let req = server_request();
    let fallback = json!("default");
    assert_eq!(req.attribute("missing"), None);
    assert_eq!(req.attribute_or("missing", &fallback), "default");

    let req2 = req.with_attribute("user", "ferret").with_attribute("empty", Value::Null);
    assert_eq!(req2.attribute("user"), Some(&json!("ferret")));
    assert_eq!(req2.attribute_or("empty", &fallback), &Value::Null);
    assert!(req.attributes().is_empty());

    let req3 = req2.without_attribute("user");
    assert!(req3.attribute("user").is_none());
    assert!(req2.attribute("user").is_some());
    assert!(!req3.without_attribute("user").ptr_eq(&req3));

    let keys: Vec<_> = req2.with_attribute("a", 1).attributes().keys().cloned().collect();
    assert_eq!(keys, ["user", "empty", "a"]);
}

#[test]
fn test_server_request_delegates() {
    let req = server_request();
    assert_eq!(req.header_line("Host"), "example.com");

    let req2 = req.with_method("PUT").unwrap().with_request_target("*").unwrap();
    assert_eq!(req2.method(), "PUT");
    assert_eq!(req2.request_target(), "*");
    assert_eq!(req2.server_params(), req.server_params());

    let req3 = req.with_attribute("id", 7).with_header("X-Id", "7");
    assert_eq!(req3.header_line("x-id"), "7");
    assert_eq!(req3.attribute("id"), Some(&json!(7)));

    let req4 = req3.with_uri(uri("https://foo.org/"), false);
    assert_eq!(req4.header_line("Host"), "foo.org");
    assert_eq!(req4.attribute("id"), Some(&json!(7)));

    assert!(req.with_method("GET").unwrap().ptr_eq(&req));
    assert!(req.with_protocol_version("1.1").unwrap().ptr_eq(&req));
    assert!(req.with_method("BAD METHOD").is_err());
    assert_eq!(Request::from(req4.clone()), *req4.as_request());
}
