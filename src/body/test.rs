use std::io::{self, SeekFrom};

use super::{Input, Stream, StreamError};
use crate::error::ErrorKind;

fn with_data(data: &str) -> Stream {
    let stream = Stream::temp();
    stream.write(data.as_bytes()).unwrap();
    stream
}

#[test]
fn test_properties() {
    let stream = with_data("data");

    assert!(stream.is_readable());
    assert!(stream.is_writable());
    assert!(stream.is_seekable());
    assert_eq!(stream.size(), Some(4));
    assert!(!stream.eof());

    let meta = stream.metadata().unwrap();
    assert_eq!(meta.mode, "w+b");
    assert!(meta.seekable);
    assert_eq!(meta.uri, None);

    stream.close();
}

#[test]
fn test_to_string() {
    let stream = with_data("data");
    assert_eq!(stream.to_string(), "data");
    assert_eq!(stream.to_string(), "data");

    stream.close();
    assert_eq!(stream.to_string(), "");
    assert_eq!(stream.to_string(), "");
}

#[test]
fn test_close() {
    let stream = Stream::temp();
    let other = stream.clone();
    stream.close();

    assert!(!other.is_seekable());
    assert!(!other.is_readable());
    assert!(!other.is_writable());
    assert!(other.eof());
    assert_eq!(other.size(), None);
    assert!(other.metadata().is_none());
    assert!(other.detach().is_none());
}

#[test]
fn test_size_is_consistent() {
    let stream = with_data("foo");
    assert_eq!(stream.size(), Some(3));
    assert_eq!(stream.write(b"test").unwrap(), 4);
    assert_eq!(stream.size(), Some(7));
    assert_eq!(stream.size(), Some(7));
}

#[test]
fn test_tell() {
    let stream = Stream::temp();
    assert_eq!(stream.tell().unwrap(), 0);
    stream.write(b"foo").unwrap();
    assert_eq!(stream.tell().unwrap(), 3);
    stream.seek(SeekFrom::Start(1)).unwrap();
    assert_eq!(stream.tell().unwrap(), 1);
}

#[test]
fn test_eof() {
    let stream = with_data("data");
    stream.rewind().unwrap();
    assert!(!stream.eof());
    assert_eq!(stream.read(4).unwrap(), "data");
    assert!(stream.eof());

    stream.rewind().unwrap();
    assert!(!stream.eof());
    assert_eq!(stream.read(2).unwrap(), "da");
    assert!(!stream.eof());
    assert_eq!(stream.read(10).unwrap(), "ta");
    assert!(stream.eof());
}

#[test]
fn test_read_unbounded_len() {
    let stream = Stream::memory("abc");
    assert_eq!(stream.read(usize::MAX).unwrap(), "abc");
    assert!(stream.eof());
    assert_eq!(stream.read(usize::MAX).unwrap(), "");

    let data = "x".repeat(20_000);
    let stream = Stream::input(io::Cursor::new(data.clone().into_bytes()));
    assert_eq!(stream.read(usize::MAX).unwrap(), data.as_str());
    assert!(stream.eof());

    let stream = Stream::input(io::Cursor::new(data.clone().into_bytes()));
    assert_eq!(stream.read(10_000).unwrap().len(), 10_000);
    assert!(!stream.eof());
}

#[test]
fn test_seek_offset_out_of_range() {
    let stream = Stream::input(io::empty());
    let err = stream.seek(SeekFrom::Start(u64::MAX)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to seek to stream position 9223372036854775807 with whence SEEK_SET",
    );
}

#[test]
fn test_contents() {
    let stream = with_data("data");
    assert_eq!(stream.contents().unwrap(), "");
    stream.seek(SeekFrom::Start(0)).unwrap();
    assert_eq!(stream.contents().unwrap(), "data");
    assert_eq!(stream.contents().unwrap(), "");
}

#[test]
fn test_detached_errors() {
    let stream = Stream::temp();
    stream.close();

    let err = stream.tell().unwrap_err();
    assert_eq!(err.to_string(), "Unable to determine stream position");
    assert_eq!(err.kind(), ErrorKind::Runtime);

    let err = stream.seek(SeekFrom::Start(0)).unwrap_err();
    assert_eq!(err.to_string(), "Unable to seek to stream position 0 with whence SEEK_SET");

    let err = stream.write(b"NOTHING").unwrap_err();
    assert_eq!(err.to_string(), "Unable to write to stream");

    let err = stream.read(10).unwrap_err();
    assert_eq!(err.to_string(), "Cannot read from non-readable stream");

    let err = stream.contents().unwrap_err();
    assert_eq!(err.to_string(), "Unable to get stream contents");
}

#[test]
fn test_input() {
    let stream = Stream::input(io::Cursor::new(b"hello world".to_vec()));
    assert!(stream.is_readable());
    assert!(!stream.is_writable());
    assert!(!stream.is_seekable());
    assert_eq!(stream.size(), None);

    assert_eq!(stream.read(5).unwrap(), "hello");
    assert_eq!(stream.tell().unwrap(), 5);
    assert!(matches!(stream.rewind(), Err(StreamError::Seek { .. })));
    assert!(matches!(stream.write(b"x"), Err(StreamError::Write(None))));

    // not seekable, display yields the remaining bytes
    assert_eq!(stream.to_string(), " world");
    assert!(stream.eof());

    let empty = Stream::new(Input::new(io::empty()), "rb");
    assert_eq!(empty.contents().unwrap(), "");
}

#[test]
fn test_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("body.txt");

    let stream = Stream::open(&path, "w+b").unwrap();
    assert!(stream.is_readable());
    assert!(stream.is_writable());
    stream.write(b"file content").unwrap();
    assert_eq!(stream.size(), Some(12));
    assert_eq!(stream.to_string(), "file content");
    assert_eq!(stream.metadata().unwrap().uri, Some(path.display().to_string()));
    stream.close();

    let stream = Stream::open(&path, "r").unwrap();
    assert!(stream.is_readable());
    assert!(!stream.is_writable());
    assert_eq!(stream.size(), Some(12));
    assert_eq!(stream.contents().unwrap(), "file content");

    let err = Stream::open(&path, "q").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Stream::open(dir.path().join("missing"), "r").unwrap_err();
    assert!(matches!(err, StreamError::Open { .. }));
}

#[test]
fn test_handle_identity() {
    let stream = Stream::temp();
    let clone = stream.clone();
    assert!(stream.ptr_eq(&clone));
    assert_eq!(stream, clone);
    assert_ne!(stream, Stream::temp());
}
