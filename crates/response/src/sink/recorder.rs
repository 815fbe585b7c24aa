use crate::sink::ResponseSink;
use bytes::BytesMut;
use http::{HeaderMap, StatusCode};
use std::io;
use tracing::warn;

/// An in-memory [`ResponseSink`] that records what a response wrote.
///
/// The first committed status wins. Writing body bytes before any status was
/// committed commits `200 OK`, the same way a real connection would.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed status, `None` if nothing was committed yet.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }
}

impl ResponseSink for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) -> io::Result<()> {
        match self.status {
            Some(committed) => {
                warn!(committed = %committed, ignored = %status, "superfluous status commit");
            }
            None => self.status = Some(status),
        }
        Ok(())
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.write_status(StatusCode::OK)?;
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseRecorder;
    use crate::sink::ResponseSink;
    use http::StatusCode;
    use std::io::Write;

    #[test]
    fn first_status_wins() {
        let mut recorder = ResponseRecorder::new();
        recorder.write_status(StatusCode::CREATED).unwrap();
        recorder.write_status(StatusCode::NOT_FOUND).unwrap();

        assert_eq!(recorder.status(), Some(StatusCode::CREATED));
    }

    #[test]
    fn body_write_commits_ok() {
        let mut recorder = ResponseRecorder::new();
        assert!(!recorder.is_committed());

        recorder.write_all(b"hello").unwrap();

        assert_eq!(recorder.status(), Some(StatusCode::OK));
        assert_eq!(recorder.body(), b"hello");
    }
}
