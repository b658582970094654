//! HTTP Message Body.
//!
//! - [`Stream`] a shared handle over a byte [`Channel`]
//! - [`Input`] read only channel over any reader
//!
//! Capabilities of a [`Stream`] are derived once from its open mode, e.g: `"r+b"` is readable
//! and writable. Seekability comes from the channel.
use bytes::{Bytes, BytesMut};
use std::{
    cell::RefCell,
    fs::OpenOptions,
    io::{self, Cursor, Read, SeekFrom},
    path::Path,
    rc::Rc,
};

use crate::log::trace;

mod channel;
mod error;

#[cfg(test)]
mod test;

pub use channel::{Channel, Input};
pub use error::StreamError;

const READ_MODES: &[&str] = &[
    "r", "w+", "r+", "x+", "c+", "rb", "w+b", "r+b", "x+b", "c+b", "rt", "w+t", "r+t", "x+t",
    "c+t", "a+",
];

const WRITE_MODES: &[&str] = &[
    "w", "w+", "rw", "r+", "x+", "c+", "wb", "w+b", "r+b", "x+b", "c+b", "w+t", "r+t", "x+t",
    "c+t", "a", "a+",
];

const CHUNK: usize = 8 * 1024;

/// Byte stream over a single [`Channel`].
///
/// `Stream` is a shared handle, clones refer to the same channel and cursor. Use
/// [`Stream::ptr_eq`] to check handle identity.
#[derive(Clone)]
pub struct Stream {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    channel: Option<Box<dyn Channel>>,
    mode: String,
    uri: Option<String>,
    readable: bool,
    writable: bool,
    seekable: bool,
    size: Option<u64>,
    eof: bool,
}

/// Description of an attached [`Stream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub mode: String,
    pub seekable: bool,
    pub eof: bool,
    pub uri: Option<String>,
}

/// Constructor
impl Stream {
    /// Create [`Stream`] from a channel and its open mode.
    pub fn new<C: Channel + 'static>(channel: C, mode: &str) -> Self {
        Self::with_uri(Box::new(channel), mode, None)
    }

    fn with_uri(channel: Box<dyn Channel>, mode: &str, uri: Option<String>) -> Self {
        let inner = Inner {
            seekable: channel.is_seekable(),
            readable: READ_MODES.contains(&mode),
            writable: WRITE_MODES.contains(&mode),
            channel: Some(channel),
            mode: mode.to_owned(),
            uri,
            size: None,
            eof: false,
        };
        Self { inner: Rc::new(RefCell::new(inner)) }
    }

    /// Create an empty, readable and writable, in memory [`Stream`].
    #[inline]
    pub fn temp() -> Self {
        Self::memory(Vec::new())
    }

    /// Create a readable and writable, in memory [`Stream`] with initial content.
    ///
    /// The cursor starts at the beginning.
    #[inline]
    pub fn memory<B: Into<Vec<u8>>>(data: B) -> Self {
        Self::new(Cursor::new(data.into()), "w+b")
    }

    /// Open a file with `fopen` style mode, e.g: `"rb"`, `"w+"`, `"a"`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Mode`] if the mode is not understood, or [`StreamError::Open`]
    /// if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let file = open_options(mode)?.open(path).map_err(|source| StreamError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::with_uri(Box::new(file), mode, Some(path.display().to_string())))
    }

    /// Create a read only [`Stream`] from any reader.
    #[inline]
    pub fn input<R: Read + 'static>(reader: R) -> Self {
        Self::new(Input::new(reader), "rb")
    }
}

impl Stream {
    /// Returns `true` if both handles refer to the same stream.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Close the underlying channel.
    pub fn close(&self) {
        if self.detach().is_some() {
            trace!("stream closed");
        }
    }

    /// Release the underlying channel, leaving the stream unusable.
    pub fn detach(&self) -> Option<Box<dyn Channel>> {
        let mut inner = self.inner.borrow_mut();
        inner.size = None;
        inner.uri = None;
        inner.readable = false;
        inner.writable = false;
        inner.seekable = false;
        inner.channel.take()
    }

    /// Returns the size in bytes, if known.
    pub fn size(&self) -> Option<u64> {
        let mut inner = self.inner.borrow_mut();
        if inner.size.is_none() {
            inner.size = inner.channel.as_mut().and_then(|channel| channel.size());
        }
        inner.size
    }

    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Position`] if detached or the position is unavailable.
    pub fn tell(&self) -> Result<u64, StreamError> {
        let mut inner = self.inner.borrow_mut();
        let channel = inner.channel.as_mut().ok_or(StreamError::Position(None))?;
        channel.position().map_err(|err| StreamError::Position(Some(err)))
    }

    /// Returns `true` if detached or a read reached the end.
    #[inline]
    pub fn eof(&self) -> bool {
        let inner = self.inner.borrow();
        inner.channel.is_none() || inner.eof
    }

    #[inline]
    pub fn is_seekable(&self) -> bool {
        self.inner.borrow().seekable
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.inner.borrow().readable
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.inner.borrow().writable
    }

    /// Move the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Seek`] if the stream is not seekable or seek failed.
    pub fn seek(&self, pos: SeekFrom) -> Result<u64, StreamError> {
        let (offset, whence) = match pos {
            SeekFrom::Start(offset) => (i64::try_from(offset).unwrap_or(i64::MAX), "SEEK_SET"),
            SeekFrom::Current(offset) => (offset, "SEEK_CUR"),
            SeekFrom::End(offset) => (offset, "SEEK_END"),
        };

        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        let position = match inner.channel.as_mut() {
            Some(channel) if inner.seekable => channel.seek(pos).ok(),
            _ => None,
        };
        let position = position.ok_or(StreamError::Seek { offset, whence })?;
        inner.eof = false;
        Ok(position)
    }

    /// Move the cursor to the start.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Seek`] if the stream is not seekable.
    #[inline]
    pub fn rewind(&self) -> Result<(), StreamError> {
        self.seek(SeekFrom::Start(0)).map(drop)
    }

    /// Write all bytes at the current position, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Write`] if the stream is not writable or the write failed.
    pub fn write(&self, data: &[u8]) -> Result<usize, StreamError> {
        let mut inner = self.inner.borrow_mut();
        inner.size = None;
        if !inner.writable {
            return Err(StreamError::Write(None));
        }
        let channel = inner.channel.as_mut().ok_or(StreamError::Write(None))?;
        channel.write_all(data).map_err(|err| StreamError::Write(Some(err)))?;
        Ok(data.len())
    }

    /// Read up to `len` bytes.
    ///
    /// Returns less than `len` bytes only when the end is reached, which also sets [`eof`].
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::NotReadable`] if the stream is not readable, or
    /// [`StreamError::Read`] if the read failed.
    ///
    /// [`eof`]: Stream::eof
    pub fn read(&self, len: usize) -> Result<Bytes, StreamError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.readable {
            return Err(StreamError::NotReadable);
        }
        let channel = inner.channel.as_mut().ok_or(StreamError::NotReadable)?;

        let mut buf = BytesMut::new();
        let mut chunk = [0u8; CHUNK];
        let mut eof = false;
        while buf.len() < len {
            let want = CHUNK.min(len - buf.len());
            match channel.read(&mut chunk[..want]) {
                Ok(0) => {
                    eof = true;
                    break;
                }
                Ok(read) => buf.extend_from_slice(&chunk[..read]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(StreamError::Read(err)),
            }
        }

        if !eof && channel.is_seekable() {
            // a read ending exactly at the end also reaches eof
            if let (Ok(position), Some(size)) = (channel.position(), channel.size()) {
                eof = position >= size;
            }
        }

        inner.eof = eof;
        Ok(buf.freeze())
    }

    /// Read the remaining bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Contents`] if the stream is not readable or the read failed.
    pub fn contents(&self) -> Result<Bytes, StreamError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.readable {
            return Err(StreamError::Contents(None));
        }
        let channel = inner.channel.as_mut().ok_or(StreamError::Contents(None))?;

        let mut buf = BytesMut::new();
        let mut chunk = [0u8; CHUNK];
        loop {
            match channel.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => buf.extend_from_slice(&chunk[..read]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(StreamError::Contents(Some(err))),
            }
        }

        inner.eof = true;
        Ok(buf.freeze())
    }

    /// Returns the whole content, rewinding first when seekable.
    ///
    /// Any error yields empty bytes.
    pub fn to_bytes(&self) -> Bytes {
        if self.is_seekable() && self.rewind().is_err() {
            return Bytes::new();
        }
        self.contents().unwrap_or_default()
    }

    /// Returns stream metadata, `None` if detached.
    pub fn metadata(&self) -> Option<Metadata> {
        let inner = self.inner.borrow();
        inner.channel.as_ref()?;
        Some(Metadata {
            mode: inner.mode.clone(),
            seekable: inner.seekable,
            eof: inner.eof,
            uri: inner.uri.clone(),
        })
    }
}

/// Handle identity.
impl PartialEq for Stream {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Stream { }

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Stream")
            .field("mode", &inner.mode)
            .field("attached", &inner.channel.is_some())
            .field("readable", &inner.readable)
            .field("writable", &inner.writable)
            .field("seekable", &inner.seekable)
            .finish()
    }
}

/// Map `fopen` style mode, ignoring `b` and `t` flags.
fn open_options(mode: &str) -> Result<OpenOptions, StreamError> {
    let base: String = mode.chars().filter(|c| !matches!(c, 'b' | 't')).collect();
    let mut options = OpenOptions::new();
    match base.as_str() {
        "r" => options.read(true),
        "r+" => options.read(true).write(true),
        "w" => options.write(true).create(true).truncate(true),
        "w+" => options.read(true).write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        "a+" => options.read(true).append(true).create(true),
        "x" => options.write(true).create_new(true),
        "x+" => options.read(true).write(true).create_new(true),
        "c" => options.write(true).create(true),
        "c+" => options.read(true).write(true).create(true),
        _ => return Err(StreamError::Mode(mode.to_owned())),
    };
    Ok(options)
}
