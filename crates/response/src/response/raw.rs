use crate::RequestHead;
use crate::cookies::Cookies;
use crate::error::{BoxError, ResponseError};
use crate::response::{HeaderResponse, HttpResponse};
use crate::sink::ResponseSink;
use cookie::Cookie;
use http::{HeaderMap, HeaderValue, StatusCode};
use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// Callback that writes a response body once the head has been committed.
pub type WriteFn = Box<dyn FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send>;

/// A response whose body is produced by a callback.
///
/// The callback only runs after the head was written successfully, and its
/// error is handed back untouched as [`ResponseError::WriteBody`]. Without a
/// callback the response has an empty body.
pub struct RawResponse {
    head: HeaderResponse,
    write_fn: Option<WriteFn>,
}

impl RawResponse {
    /// A `200 OK` response with the given content type.
    pub fn new<F>(content_type: HeaderValue, write_fn: F) -> Self
    where
        F: FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send + 'static,
    {
        Self::build(StatusCode::OK.as_u16(), content_type, None, None, write_fn)
    }

    /// `content_type` replaces any `Content-Type` already present in `headers`.
    pub fn with_headers<F>(status_code: u16, content_type: HeaderValue, headers: HeaderMap, write_fn: F) -> Self
    where
        F: FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send + 'static,
    {
        Self::build(status_code, content_type, Some(headers), None, write_fn)
    }

    pub fn with_cookies<F, I>(status_code: u16, content_type: HeaderValue, cookies: I, write_fn: F) -> Self
    where
        F: FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send + 'static,
        I: IntoIterator<Item = Cookie<'static>>,
    {
        Self::build(status_code, content_type, None, Some(Cookies::new(cookies)), write_fn)
    }

    /// `content_type` replaces any `Content-Type` already present in `headers`.
    pub fn with_headers_and_cookies<F, I>(
        status_code: u16,
        content_type: HeaderValue,
        headers: HeaderMap,
        cookies: I,
        write_fn: F,
    ) -> Self
    where
        F: FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send + 'static,
        I: IntoIterator<Item = Cookie<'static>>,
    {
        Self::build(status_code, content_type, Some(headers), Some(Cookies::new(cookies)), write_fn)
    }

    fn build<F>(
        status_code: u16,
        content_type: HeaderValue,
        headers: Option<HeaderMap>,
        cookies: Option<Cookies>,
        write_fn: F,
    ) -> Self
    where
        F: FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send + 'static,
    {
        Self {
            head: HeaderResponse::typed(status_code, content_type, headers, cookies),
            write_fn: Some(Box::new(write_fn)),
        }
    }

    pub fn set_write_fn<F>(&mut self, write_fn: F)
    where
        F: FnMut(&mut dyn io::Write) -> Result<(), BoxError> + Send + 'static,
    {
        self.write_fn = Some(Box::new(write_fn));
    }

    #[inline]
    pub fn has_write_fn(&self) -> bool {
        self.write_fn.is_some()
    }

    #[inline]
    pub fn head(&self) -> &HeaderResponse {
        &self.head
    }

    pub fn into_head(self) -> HeaderResponse {
        self.head
    }
}

impl From<HeaderResponse> for RawResponse {
    fn from(head: HeaderResponse) -> Self {
        Self { head, write_fn: None }
    }
}

impl Deref for RawResponse {
    type Target = HeaderResponse;

    fn deref(&self) -> &Self::Target {
        &self.head
    }
}

impl DerefMut for RawResponse {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.head
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse").field("head", &self.head).field("write_fn", &self.write_fn.is_some()).finish()
    }
}

impl HttpResponse for RawResponse {
    fn write(&mut self, sink: &mut dyn ResponseSink, req: &RequestHead) -> Result<(), ResponseError> {
        self.head.write(sink, req)?;

        let Some(write_fn) = self.write_fn.as_mut() else {
            return Ok(());
        };
        let body: &mut dyn io::Write = sink;
        write_fn(body).map_err(ResponseError::WriteBody)?;
        trace!("raw response body written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::RawResponse;
    use crate::error::{BoxError, ResponseError};
    use crate::response::{HeaderResponse, HttpResponse};
    use crate::sink::ResponseRecorder;
    use crate::RequestHead;
    use cookie::Cookie;
    use http::header::{CONTENT_TYPE, SET_COOKIE, X_CONTENT_TYPE_OPTIONS};
    use http::{HeaderMap, HeaderValue, Request, StatusCode};
    use std::io;

    const BYTES: HeaderValue = HeaderValue::from_static("bytes");

    fn request_head() -> RequestHead {
        Request::new(()).into_parts().0
    }

    fn noop(_w: &mut dyn io::Write) -> Result<(), BoxError> {
        Ok(())
    }

    fn hello(w: &mut dyn io::Write) -> Result<(), BoxError> {
        w.write_all(b"hello")?;
        Ok(())
    }

    fn content_type(resp: &mut RawResponse) -> Vec<HeaderValue> {
        resp.headers().get_all(CONTENT_TYPE).iter().cloned().collect()
    }

    #[test]
    fn constructor() {
        let mut resp = RawResponse::new(BYTES, noop);

        assert!(resp.has_write_fn());
        assert_eq!(resp.status_code(), 200);
        assert_eq!(content_type(&mut resp), [BYTES]);
        assert_eq!(resp.headers().len(), 1);

        let mut expected = HeaderMap::new();
        expected.insert(CONTENT_TYPE, BYTES);
        assert_eq!(resp.head(), &HeaderResponse::new(200).with_headers(expected));
    }

    #[test]
    fn constructor_with_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("h1", HeaderValue::from_static("v1"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

        let mut resp = RawResponse::with_headers(201, BYTES, headers, noop);

        assert_eq!(resp.status_code(), 201);
        assert_eq!(content_type(&mut resp), [BYTES]);
        assert_eq!(resp.headers()["h1"], "v1");
        assert_eq!(resp.headers().len(), 2);
        assert!(resp.cookies().is_empty());
    }

    #[test]
    fn constructor_with_cookies() {
        let mut resp = RawResponse::with_cookies(201, BYTES, [Cookie::new("cookie3", "val3")], noop);

        assert_eq!(resp.status_code(), 201);
        assert_eq!(content_type(&mut resp), [BYTES]);
        assert_eq!(resp.cookies().len(), 1);
        assert_eq!(resp.cookies().iter().next().unwrap().name_value(), ("cookie3", "val3"));
    }

    #[test]
    fn constructor_with_headers_and_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert("h2", HeaderValue::from_static("v2"));

        let mut resp =
            RawResponse::with_headers_and_cookies(201, BYTES, headers, [Cookie::new("cookie4", "val4")], noop);

        assert_eq!(resp.status_code(), 201);
        assert_eq!(content_type(&mut resp), [BYTES]);
        assert_eq!(resp.headers()["h2"], "v2");
        assert_eq!(resp.cookies().len(), 1);
    }

    #[test]
    fn without_body() {
        let mut resp = RawResponse::from(HeaderResponse::new(201));

        let mut recorder = ResponseRecorder::new();
        resp.write(&mut recorder, &request_head()).unwrap();

        assert_eq!(recorder.status(), Some(StatusCode::CREATED));
        assert_eq!(recorder.headers().len(), 1);
        assert_eq!(recorder.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert!(recorder.body().is_empty());
    }

    #[test]
    fn with_body() {
        let mut resp = RawResponse::from(HeaderResponse::new(201));
        resp.set_write_fn(hello);

        let mut recorder = ResponseRecorder::new();
        resp.write(&mut recorder, &request_head()).unwrap();

        assert_eq!(recorder.status(), Some(StatusCode::CREATED));
        assert_eq!(recorder.body(), b"hello");
    }

    #[test]
    fn with_body_headers_and_cookies() {
        let mut resp = RawResponse::from(HeaderResponse::new(201));
        resp.set_write_fn(hello);
        resp.headers().append(CONTENT_TYPE, BYTES);
        resp.cookies().add(Cookie::new("cookie1", "val1"));
        resp.cookies().add(Cookie::new("cookie2", "val2"));

        let mut recorder = ResponseRecorder::new();
        resp.write(&mut recorder, &request_head()).unwrap();

        assert_eq!(recorder.status(), Some(StatusCode::CREATED));
        assert_eq!(recorder.body(), b"hello");
        assert_eq!(recorder.headers().len(), 4);
        assert_eq!(recorder.headers()[CONTENT_TYPE], "bytes");
        let set_cookies: Vec<_> = recorder.headers().get_all(SET_COOKIE).iter().collect();
        assert_eq!(set_cookies, ["cookie1=val1", "cookie2=val2"]);
    }

    #[test]
    fn status_code_one_skips_callback() {
        let mut resp = RawResponse::from(HeaderResponse::new(1));
        resp.set_write_fn(|_w: &mut dyn io::Write| -> Result<(), BoxError> { panic!("callback must not run") });

        let mut recorder = ResponseRecorder::new();
        let err = resp.write(&mut recorder, &request_head()).unwrap_err();

        assert!(matches!(err, ResponseError::InvalidStatusCode { code: 1 }));
        assert!(!recorder.is_committed());
        assert!(recorder.body().is_empty());
    }

    #[test]
    fn callback_error_is_returned_unchanged() {
        let mut resp = RawResponse::new(BYTES, |w: &mut dyn io::Write| -> Result<(), BoxError> {
            w.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away").into())
        });

        let mut recorder = ResponseRecorder::new();
        let err = resp.write(&mut recorder, &request_head()).unwrap_err();

        match err {
            ResponseError::WriteBody(cause) => {
                assert_eq!(cause.downcast_ref::<io::Error>().unwrap().kind(), io::ErrorKind::ConnectionReset);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(recorder.status(), Some(StatusCode::OK));
        assert_eq!(recorder.body(), b"partial");
    }
}
