//! Uploaded files.
//!
//! An [`UploadedFile`] refers to either a file path or a [`Stream`], and can be moved exactly
//! once. [`FileTree`] is the nested structure uploaded files are normalized into.
use indexmap::IndexMap;
use std::{
    cell::Cell,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    body::{Stream, StreamError},
    log::{debug, error},
};

mod error;

#[cfg(test)]
mod test;

pub use error::UploadError;

const MOVE_CHUNK: usize = 1024 * 1024;

/// Upload status code, as reported by the upload handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadStatus(u8);

impl UploadStatus {
    /// `0`. Upload succeeded.
    pub const OK: Self = Self(0);
    /// `1`. File exceeds the server size limit.
    pub const INI_SIZE: Self = Self(1);
    /// `2`. File exceeds the form size limit.
    pub const FORM_SIZE: Self = Self(2);
    /// `3`. File only partially uploaded.
    pub const PARTIAL: Self = Self(3);
    /// `4`. No file was uploaded.
    pub const NO_FILE: Self = Self(4);
    /// `6`. Missing temporary directory.
    pub const NO_TMP_DIR: Self = Self(6);
    /// `7`. Failed to write to disk.
    pub const CANT_WRITE: Self = Self(7);
    /// `8`. Upload stopped by an extension.
    pub const EXTENSION: Self = Self(8);

    /// Create [`UploadStatus`] from integer code.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Status`] if the code is outside `0..=8`.
    pub fn from_code(code: i64) -> Result<Self, UploadError> {
        match u8::try_from(code) {
            Ok(ok) if ok <= 8 => Ok(Self(ok)),
            _ => Err(UploadError::Status(code)),
        }
    }

    /// Returns the integer code.
    #[inline]
    pub const fn code(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.0 == 0
    }
}

impl Default for UploadStatus {
    #[inline]
    fn default() -> Self {
        Self::OK
    }
}

/// Content of an uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Path to a temporary file.
    File(PathBuf),
    /// Already opened stream.
    Stream(Stream),
}

impl From<PathBuf> for Source {
    #[inline]
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl From<&Path> for Source {
    #[inline]
    fn from(value: &Path) -> Self {
        Self::File(value.to_path_buf())
    }
}

impl From<&str> for Source {
    #[inline]
    fn from(value: &str) -> Self {
        Self::File(value.into())
    }
}

impl From<String> for Source {
    #[inline]
    fn from(value: String) -> Self {
        Self::File(value.into())
    }
}

impl From<Stream> for Source {
    #[inline]
    fn from(value: Stream) -> Self {
        Self::Stream(value)
    }
}

/// A file uploaded through an HTTP request.
///
/// Clones share the moved state.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    inner: Rc<Inner>,
}

#[derive(Debug, PartialEq)]
struct Inner {
    /// only kept when status is OK
    source: Option<Source>,
    size: u64,
    status: UploadStatus,
    client_filename: Option<String>,
    client_media_type: Option<String>,
    moved: Cell<bool>,
}

impl UploadedFile {
    /// Create new [`UploadedFile`].
    ///
    /// The source is discarded when `status` is not [`UploadStatus::OK`].
    pub fn new<S: Into<Source>>(
        source: S,
        size: u64,
        status: UploadStatus,
        client_filename: Option<String>,
        client_media_type: Option<String>,
    ) -> Self {
        let source = if status.is_ok() { Some(source.into()) } else { None };
        Self {
            inner: Rc::new(Inner {
                source,
                size,
                status,
                client_filename,
                client_media_type,
                moved: Cell::new(false),
            }),
        }
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.inner.size
    }

    #[inline]
    pub fn status(&self) -> UploadStatus {
        self.inner.status
    }

    /// Returns the filename sent by the client, must not be trusted.
    #[inline]
    pub fn client_filename(&self) -> Option<&str> {
        self.inner.client_filename.as_deref()
    }

    /// Returns the media type sent by the client, must not be trusted.
    #[inline]
    pub fn client_media_type(&self) -> Option<&str> {
        self.inner.client_media_type.as_deref()
    }

    #[inline]
    pub fn is_moved(&self) -> bool {
        self.inner.moved.get()
    }

    /// Returns the uploaded content, a file source is opened read only.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Upload`] when the upload failed, [`UploadError::Moved`] after a
    /// successful [`move_to`][UploadedFile::move_to].
    pub fn stream(&self) -> Result<Stream, UploadError> {
        match self.active()? {
            Source::Stream(stream) => Ok(stream.clone()),
            Source::File(path) => Ok(Stream::open(path, "r")?),
        }
    }

    /// Move the uploaded content to `target`.
    ///
    /// A file source is renamed, falling back to copy and remove. A stream source is rewound
    /// when seekable, then copied.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidPath`] for an empty target, [`UploadError::MoveFailed`] if
    /// the content cannot be moved, and the [`stream`][UploadedFile::stream] errors.
    pub fn move_to<P: AsRef<Path>>(&self, target: P) -> Result<(), UploadError> {
        let source = self.active()?;
        let target = target.as_ref();
        if target.as_os_str().is_empty() {
            return Err(UploadError::InvalidPath);
        }

        let result = match source {
            Source::File(path) => move_file(path, target),
            Source::Stream(stream) => write_file(stream, target),
        };

        match result {
            Ok(()) => {
                self.inner.moved.set(true);
                debug!("uploaded file moved to {}", target.display());
                Ok(())
            }
            Err(MoveError::Io(source)) => {
                error!("failed to move uploaded file to {}: {source}", target.display());
                Err(UploadError::MoveFailed { path: target.display().to_string(), source })
            }
            Err(MoveError::Stream(err)) => Err(err.into()),
        }
    }

    fn active(&self) -> Result<&Source, UploadError> {
        if self.inner.moved.get() {
            return Err(UploadError::Moved);
        }
        self.inner.source.as_ref().ok_or(UploadError::Upload)
    }
}

impl PartialEq for UploadedFile {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

enum MoveError {
    Io(io::Error),
    Stream(StreamError),
}

impl From<io::Error> for MoveError {
    #[inline]
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}

impl From<StreamError> for MoveError {
    #[inline]
    fn from(v: StreamError) -> Self {
        Self::Stream(v)
    }
}

fn move_file(source: &Path, target: &Path) -> Result<(), MoveError> {
    if fs::rename(source, target).is_err() {
        // rename cannot cross devices
        fs::copy(source, target)?;
        fs::remove_file(source)?;
    }
    Ok(())
}

fn write_file(stream: &Stream, target: &Path) -> Result<(), MoveError> {
    if stream.is_seekable() {
        stream.rewind()?;
    }
    let mut file = File::create(target)?;
    while !stream.eof() {
        file.write_all(&stream.read(MOVE_CHUNK)?)?;
    }
    file.flush()?;
    Ok(())
}

// ===== File Tree =====

/// Uploaded files keyed by field name, possibly nested.
#[derive(Debug, Clone, PartialEq)]
pub enum FileTree {
    File(UploadedFile),
    Nested(IndexMap<String, FileTree>),
}

impl FileTree {
    /// Returns the file if this is a leaf.
    #[inline]
    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Nested(_) => None,
        }
    }

    /// Returns the child with given key if this is a branch.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&FileTree> {
        match self {
            Self::File(_) => None,
            Self::Nested(map) => map.get(key),
        }
    }
}

impl From<UploadedFile> for FileTree {
    #[inline]
    fn from(value: UploadedFile) -> Self {
        Self::File(value)
    }
}
