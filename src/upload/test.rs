use std::fs;

use super::{FileTree, Source, UploadError, UploadStatus, UploadedFile};
use crate::{body::Stream, error::ErrorKind};

fn stream_file(content: &str) -> (Stream, UploadedFile) {
    let stream = Stream::temp();
    stream.write(content.as_bytes()).unwrap();
    let file = UploadedFile::new(
        stream.clone(),
        stream.size().unwrap(),
        UploadStatus::OK,
        Some("filename.txt".into()),
        Some("text/plain".into()),
    );
    (stream, file)
}

#[test]
fn test_status_code() {
    for code in 0..=8 {
        assert_eq!(UploadStatus::from_code(code).unwrap().code() as i64, code);
    }
    assert_eq!(UploadStatus::from_code(4).unwrap(), UploadStatus::NO_FILE);

    for code in [-1, 9, 256] {
        let err = UploadStatus::from_code(code).unwrap_err();
        assert_eq!(err.to_string(), "Invalid error status for UploadedFile");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_constructor() {
    let (stream, file) = stream_file("test upload file");
    assert_eq!(file.size(), 16);
    assert_eq!(file.status(), UploadStatus::OK);
    assert_eq!(file.client_filename(), Some("filename.txt"));
    assert_eq!(file.client_media_type(), Some("text/plain"));
    assert!(file.stream().unwrap().ptr_eq(&stream));
}

#[test]
fn test_stream_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("source");
    fs::write(&path, "from file").unwrap();

    let file = UploadedFile::new(path.as_path(), 9, UploadStatus::OK, None, None);
    let stream = file.stream().unwrap();
    assert!(stream.is_readable());
    assert!(!stream.is_writable());
    assert_eq!(stream.to_string(), "from file");
}

#[test]
fn test_stream_with_error_status() {
    for status in [
        UploadStatus::INI_SIZE,
        UploadStatus::FORM_SIZE,
        UploadStatus::PARTIAL,
        UploadStatus::NO_FILE,
        UploadStatus::NO_TMP_DIR,
        UploadStatus::CANT_WRITE,
        UploadStatus::EXTENSION,
    ] {
        let file = UploadedFile::new("/tmp/upload", 0, status, None, None);
        let err = file.stream().unwrap_err();
        assert_eq!(err.to_string(), "Cannot retrieve stream due to upload error");
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert!(matches!(file.move_to("/tmp/target"), Err(UploadError::Upload)));
    }
}

#[test]
fn test_move_stream() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("moved.txt");

    let (stream, file) = stream_file("test upload file");
    file.move_to(&target).unwrap();
    assert!(file.is_moved());
    assert_eq!(fs::read_to_string(&target).unwrap(), stream.to_string());
}

#[test]
fn test_move_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let target = dir.path().join("target");
    fs::write(&source, "file upload").unwrap();

    let file = UploadedFile::new(source.clone(), 11, UploadStatus::OK, Some("source".into()), None);
    file.move_to(&target).unwrap();

    assert!(!source.exists());
    assert_eq!(fs::read_to_string(&target).unwrap(), "file upload");
}

#[test]
fn test_move_invalid_path() {
    let (_, file) = stream_file("");
    let err = file.move_to("").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid path provided for move operation; must be a non-empty string"
    );
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!file.is_moved());
}

#[test]
fn test_move_more_than_once() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("moved.txt");

    let (_, file) = stream_file("test upload file");
    let shared = file.clone();
    file.move_to(&target).unwrap();
    assert!(target.exists());

    let err = shared.move_to(&target).unwrap_err();
    assert_eq!(err.to_string(), "Cannot retrieve stream after it has already been moved");
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert!(matches!(file.stream(), Err(UploadError::Moved)));
}

#[test]
fn test_unable_to_move() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    fs::write(&source, "file upload").unwrap();
    let target = dir.path().join("missing").join("target");

    let file = UploadedFile::new(source, 11, UploadStatus::OK, None, None);
    let err = file.move_to(&target).unwrap_err();
    assert!(matches!(err, UploadError::MoveFailed { .. }));
    assert_eq!(
        err.to_string(),
        format!("Uploaded file could not be moved to \"{}\"", target.display())
    );
    assert!(!file.is_moved());
}

#[test]
fn test_file_tree() {
    let (_, file) = stream_file("a");
    let tree = FileTree::Nested([("avatar".to_owned(), FileTree::from(file.clone()))].into_iter().collect());

    assert_eq!(tree.get("avatar").and_then(FileTree::as_file), Some(&file));
    assert!(tree.get("missing").is_none());
    assert!(tree.as_file().is_none());
    assert!(matches!(Source::from("/tmp/x"), Source::File(_)));
}
