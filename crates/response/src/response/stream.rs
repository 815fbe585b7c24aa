use crate::RequestHead;
use crate::cookies::Cookies;
use crate::error::ResponseError;
use crate::response::{HeaderResponse, HttpResponse};
use crate::sink::ResponseSink;
use cookie::Cookie;
use http::{HeaderMap, HeaderValue, StatusCode};
use std::fmt;
use std::io;
use std::io::Read;
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// A response whose body is copied from a reader until it is exhausted.
///
/// Once the head is committed there is no way back: a read or write failure
/// halfway through leaves the bytes copied so far on the sink and is reported
/// as [`ResponseError::StreamTransferFailed`].
pub struct StreamResponse {
    head: HeaderResponse,
    reader: Box<dyn Read + Send>,
}

impl StreamResponse {
    /// A `200 OK` response with the given content type.
    pub fn new<R>(reader: R, content_type: HeaderValue) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::build(StatusCode::OK.as_u16(), reader, content_type, None, None)
    }

    /// `content_type` replaces any `Content-Type` already present in `headers`.
    pub fn with_headers<R>(status_code: u16, reader: R, content_type: HeaderValue, headers: HeaderMap) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::build(status_code, reader, content_type, Some(headers), None)
    }

    pub fn with_cookies<R, I>(status_code: u16, reader: R, content_type: HeaderValue, cookies: I) -> Self
    where
        R: Read + Send + 'static,
        I: IntoIterator<Item = Cookie<'static>>,
    {
        Self::build(status_code, reader, content_type, None, Some(Cookies::new(cookies)))
    }

    /// `content_type` replaces any `Content-Type` already present in `headers`.
    pub fn with_headers_and_cookies<R, I>(
        status_code: u16,
        reader: R,
        content_type: HeaderValue,
        headers: HeaderMap,
        cookies: I,
    ) -> Self
    where
        R: Read + Send + 'static,
        I: IntoIterator<Item = Cookie<'static>>,
    {
        Self::build(status_code, reader, content_type, Some(headers), Some(Cookies::new(cookies)))
    }

    /// Pairs an existing head with a reader, leaving its headers untouched.
    pub fn from_head<R>(head: HeaderResponse, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self { head, reader: Box::new(reader) }
    }

    fn build<R>(
        status_code: u16,
        reader: R,
        content_type: HeaderValue,
        headers: Option<HeaderMap>,
        cookies: Option<Cookies>,
    ) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::from_head(HeaderResponse::typed(status_code, content_type, headers, cookies), reader)
    }

    #[inline]
    pub fn head(&self) -> &HeaderResponse {
        &self.head
    }
}

impl Deref for StreamResponse {
    type Target = HeaderResponse;

    fn deref(&self) -> &Self::Target {
        &self.head
    }
}

impl DerefMut for StreamResponse {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.head
    }
}

impl fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse").field("head", &self.head).finish_non_exhaustive()
    }
}

impl HttpResponse for StreamResponse {
    fn write(&mut self, sink: &mut dyn ResponseSink, req: &RequestHead) -> Result<(), ResponseError> {
        self.head.write(sink, req)?;

        let copied = io::copy(&mut self.reader, sink).map_err(ResponseError::stream_transfer_failed)?;
        debug!(bytes = copied, "stream response transferred");
        Ok(())
    }
}
