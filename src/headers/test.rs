use crate::headers::{HeaderMap, IntoHeaderValues};

const fn is_header_values<T: IntoHeaderValues>() { }
const _: () = {
    is_header_values::<&str>();
    is_header_values::<String>();
    is_header_values::<Vec<String>>();
    is_header_values::<[&str; 2]>();
};

fn names(map: &HeaderMap) -> Vec<&str> {
    map.iter().map(|(name, _)| name).collect()
}

#[test]
fn header_map() {
    let mut map = HeaderMap::new();

    assert!(map.insert("Content-Type", "text/html").is_none());
    assert!(map.contains("content-type"));
    assert!(map.contains("CONTENT-TYPE"));
    assert_eq!(map.get("content-type"), ["text/html"]);
    assert_eq!(map.stored_name("content-type"), Some("Content-Type"));

    assert!(map.insert("accept", "*/*").is_none());
    assert!(map.insert("host", "example.com").is_none());
    assert_eq!(map.len(), 3);

    // Insert Multi

    map.append("X-Foo", ["a", "b"]);
    map.append("x-foo", "c");
    assert_eq!(map.get("X-FOO"), ["a", "b", "c"]);
    assert_eq!(map.get_line("x-foo"), "a,b,c");
    assert_eq!(names(&map), ["Content-Type", "accept", "host", "X-Foo"]);

    // Remove

    assert_eq!(map.remove("ACCEPT"), Some(vec!["*/*".to_owned()]));
    assert!(!map.contains("accept"));
    assert!(map.remove("accept").is_none());
    assert_eq!(names(&map), ["Content-Type", "host", "X-Foo"]);

    // Clear

    map.clear();
    assert!(map.is_empty());
    assert!(!map.contains("content-type"));
    assert!(map.get("content-type").is_empty());
    assert_eq!(map.get_line("content-type"), "");
}

#[test]
fn insert_replaces_casing_and_order() {
    let mut map = HeaderMap::new();
    map.insert("X-Foo", "foo");
    map.insert("Accept", "*/*");

    let old = map.insert("x-FOO", vec!["bar".to_owned()]);
    assert_eq!(old, Some(vec!["foo".to_owned()]));
    assert_eq!(names(&map), ["Accept", "x-FOO"]);
    assert_eq!(map.get("x-foo"), ["bar"]);
    assert_eq!(map.stored_name("X-Foo"), Some("x-FOO"));
}

#[test]
fn insert_first() {
    let mut map = HeaderMap::new();
    map.insert("Accept", "*/*");
    map.insert("host", "old.com");
    map.insert("X-Foo", "foo");

    map.insert_first("host", "new.com");
    assert_eq!(names(&map), ["host", "Accept", "X-Foo"]);
    assert_eq!(map.get("Host"), ["new.com"]);

    map.insert_first("Date", "now");
    assert_eq!(names(&map), ["Date", "host", "Accept", "X-Foo"]);
}

#[test]
fn extend_merges_first_seen_casing() {
    let map: HeaderMap = [
        ("X-Foo", vec!["a"]),
        ("Accept", vec!["*/*"]),
        ("x-foo", vec!["b", "c"]),
    ]
    .into_iter()
    .collect();

    assert_eq!(names(&map), ["X-Foo", "Accept"]);
    assert_eq!(map.get("x-foo"), ["a", "b", "c"]);
}

#[test]
fn equality_follows_order() {
    let a: HeaderMap = [("A", "1"), ("B", "2")].into_iter().collect();
    let b: HeaderMap = [("B", "2"), ("A", "1")].into_iter().collect();
    assert_ne!(a, b);
    assert_eq!(a, [("A", "1"), ("B", "2")].into_iter().collect::<HeaderMap>());

    let c: HeaderMap = [("a", "1"), ("B", "2")].into_iter().collect();
    assert_ne!(a, c);

    let mut d = b.clone();
    d.remove("B");
    d.append("B", "2");
    assert_eq!(a, d);
}
