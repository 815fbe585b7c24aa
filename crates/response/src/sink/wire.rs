//! HTTP/1.1 serialization of a response onto a byte stream.
//!
//! Headers are buffered until the status is committed, then the status line,
//! every header and the terminating blank line are encoded into one buffer and
//! written in a single call. Body bytes pass straight through afterwards.
//!
//! No framing is applied to the body. When the caller set neither
//! `Content-Length` nor `Transfer-Encoding`, `Connection: close` is added so
//! the peer reads the body until the connection closes.

use crate::sink::ResponseSink;
use bytes::{BufMut, BytesMut};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use std::io;
use std::io::Write;
use tracing::{trace, warn};

/// Initial buffer size allocated for head serialization
const INIT_HEAD_SIZE: usize = 4 * 1024;

const CLOSE_VALUE: HeaderValue = HeaderValue::from_static("close");

#[derive(Debug)]
pub struct WireSink<W> {
    writer: W,
    headers: HeaderMap,
    head: BytesMut,
    status: Option<StatusCode>,
}

impl<W: Write> WireSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, INIT_HEAD_SIZE)
    }

    pub fn with_capacity(writer: W, head_capacity: usize) -> Self {
        Self { writer, headers: HeaderMap::new(), head: BytesMut::with_capacity(head_capacity), status: None }
    }

    /// The committed status, `None` while the head is still pending.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn encode_head(&mut self, status: StatusCode) -> io::Result<()> {
        let has_framing =
            self.headers.contains_key(header::CONTENT_LENGTH) || self.headers.contains_key(header::TRANSFER_ENCODING);
        let has_body = !(status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED);
        if has_body && !has_framing {
            self.headers.insert(header::CONNECTION, CLOSE_VALUE);
        }

        self.head.clear();
        write!(
            FastWrite(&mut self.head),
            "HTTP/1.1 {} {}\r\n",
            status.as_str(),
            status.canonical_reason().unwrap_or("")
        )?;

        for (header_name, header_value) in &self.headers {
            self.head.put_slice(header_name.as_ref());
            self.head.put_slice(b": ");
            self.head.put_slice(header_value.as_ref());
            self.head.put_slice(b"\r\n");
        }
        self.head.put_slice(b"\r\n");
        Ok(())
    }
}

impl<W: Write> ResponseSink for WireSink<W> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) -> io::Result<()> {
        if let Some(committed) = self.status {
            warn!(committed = %committed, ignored = %status, "superfluous status commit");
            return Ok(());
        }

        self.encode_head(status)?;
        self.writer.write_all(&self.head)?;
        self.status = Some(status);
        trace!(status = %status, head_size = self.head.len(), "response head written");
        Ok(())
    }
}

impl<W: Write> Write for WireSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.write_status(StatusCode::OK)?;
        }
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Writer over `BytesMut` used by `write!` for the status line.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
