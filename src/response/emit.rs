use bytes::{BufMut, BytesMut};
use std::io::{self, Write};

use super::Response;
use crate::log::{debug, warning};

/// Writes [`Response`]s to an output sink.
///
/// The head is written once, later emissions only write the body.
#[derive(Debug)]
pub struct Emitter<W> {
    writer: W,
    headers_sent: bool,
}

impl<W: Write> Emitter<W> {
    #[inline]
    pub fn new(writer: W) -> Self {
        Self { writer, headers_sent: false }
    }

    /// Returns `true` if the head has been written.
    #[inline]
    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write the response head, if not already sent, then the body verbatim.
    ///
    /// # Errors
    ///
    /// Returns error from the underlying writer.
    pub fn emit(&mut self, res: &Response) -> io::Result<()> {
        if self.headers_sent {
            warning!("headers already sent, emitting body only");
        } else {
            let mut head = BytesMut::with_capacity(256);
            write_head(res, &mut head);
            self.writer.write_all(&head)?;
            self.headers_sent = true;
            debug!("emitted response head: {} {}", res.status(), res.reason_phrase());
        }

        self.writer.write_all(&res.body().to_bytes())?;
        self.writer.flush()
    }
}

/// Status line, each header value as its own line, then an empty line.
fn write_head<B: BufMut>(res: &Response, mut bufm: B) {
    let mut itoa = itoa::Buffer::new();

    bufm.put_slice(b"HTTP/");
    bufm.put_slice(res.protocol_version().as_bytes());
    bufm.put_slice(b" ");
    bufm.put_slice(itoa.format(res.status().status()).as_bytes());
    if !res.reason_phrase().is_empty() {
        bufm.put_slice(b" ");
        bufm.put_slice(res.reason_phrase().as_bytes());
    }
    bufm.put_slice(b"\r\n");

    for (name, values) in res.headers() {
        for value in values {
            bufm.put_slice(name.as_bytes());
            bufm.put_slice(b": ");
            bufm.put_slice(value.as_bytes());
            bufm.put_slice(b"\r\n");
        }
    }

    bufm.put_slice(b"\r\n");
}
