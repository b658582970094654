use std::{
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom, Write},
};

/// Byte channel wrapped by a [`Stream`].
///
/// Only reading is required, other capabilities default to [`io::ErrorKind::Unsupported`].
///
/// [`Stream`]: super::Stream
pub trait Channel {
    /// Pull some bytes into `buf`, returning how many bytes were read, `0` at the end.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write the whole buffer.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let _ = buf;
        Err(io::ErrorKind::Unsupported.into())
    }

    /// Move the cursor, returning the new position from the start.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let _ = pos;
        Err(io::ErrorKind::Unsupported.into())
    }

    /// Returns the cursor position from the start.
    fn position(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::Current(0))
    }

    /// Returns `true` if [`seek`][Channel::seek] is supported.
    fn is_seekable(&self) -> bool {
        false
    }

    /// Returns the total size in bytes, if known.
    fn size(&mut self) -> Option<u64> {
        None
    }
}

impl Channel for File {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Write::write_all(self, buf)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }

    #[inline]
    fn is_seekable(&self) -> bool {
        true
    }

    fn size(&mut self) -> Option<u64> {
        self.metadata().ok().map(|meta| meta.len())
    }
}

/// In memory channel.
impl Channel for Cursor<Vec<u8>> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Write::write_all(self, buf)
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Seek::seek(self, pos)
    }

    #[inline]
    fn position(&mut self) -> io::Result<u64> {
        Ok(Cursor::position(self))
    }

    #[inline]
    fn is_seekable(&self) -> bool {
        true
    }

    #[inline]
    fn size(&mut self) -> Option<u64> {
        Some(self.get_ref().len() as u64)
    }
}

/// Read only, forward only channel over any reader, e.g: process stdin.
#[derive(Debug)]
pub struct Input<R> {
    reader: R,
    position: u64,
}

impl<R: Read> Input<R> {
    /// Create new [`Input`].
    #[inline]
    pub fn new(reader: R) -> Self {
        Self { reader, position: 0 }
    }

    /// Returns the inner reader.
    #[inline]
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Channel for Input<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.reader.read(buf)?;
        self.position += read as u64;
        Ok(read)
    }

    #[inline]
    fn position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}
