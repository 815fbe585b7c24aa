use crate::RequestHead;
use crate::cookies::Cookies;
use crate::error::ResponseError;
use crate::response::HttpResponse;
use crate::sink::ResponseSink;
use http::header::{CONTENT_TYPE, SET_COOKIE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, HeaderValue, StatusCode};
use tracing::trace;

const NOSNIFF: HeaderValue = HeaderValue::from_static("nosniff");

/// Status code, headers and cookies of a response, without a body.
///
/// This is the prologue every other response kind runs before writing its
/// body. A status code of `0` means "unset" and is sent as `200 OK`.
///
/// Headers and cookies are created on first access, so a bare
/// `HeaderResponse::new(204)` carries no allocations until something is added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderResponse {
    status_code: u16,
    headers: Option<HeaderMap>,
    cookies: Option<Cookies>,
}

impl HeaderResponse {
    pub fn new(status_code: u16) -> Self {
        Self { status_code, headers: None, cookies: None }
    }

    /// A canned `500 Internal Server Error` with no headers and no cookies.
    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR.as_u16())
    }

    /// Builds a head whose `Content-Type` is `content_type`, whatever `headers`
    /// said about it.
    pub(crate) fn typed(
        status_code: u16,
        content_type: HeaderValue,
        headers: Option<HeaderMap>,
        cookies: Option<Cookies>,
    ) -> Self {
        let mut headers = headers.unwrap_or_default();
        headers.insert(CONTENT_TYPE, content_type);
        Self { status_code, headers: Some(headers), cookies }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers().extend(headers);
        self
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: Cookies) -> Self {
        self.cookies().extend(cookies);
        self
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    #[inline]
    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = status_code;
    }

    pub fn headers(&mut self) -> &mut HeaderMap {
        self.headers.get_or_insert_with(HeaderMap::new)
    }

    pub fn cookies(&mut self) -> &mut Cookies {
        self.cookies.get_or_insert_with(Cookies::default)
    }

    /// Resolves the status code that will be committed.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::InvalidStatusCode`] for a non-zero code outside `100..=599`.
    pub fn status(&self) -> Result<StatusCode, ResponseError> {
        match self.status_code {
            0 => Ok(StatusCode::OK),
            code @ 100..=599 => {
                StatusCode::from_u16(code).ok().ok_or_else(|| ResponseError::invalid_status_code(code))
            }
            code => Err(ResponseError::invalid_status_code(code)),
        }
    }

    /// Writes headers, cookies and the status to `sink`. No body bytes are written.
    ///
    /// Every response carries `X-Content-Type-Options: nosniff`. Caller headers are
    /// appended after it, and each cookie becomes its own `Set-Cookie` line in the
    /// order it was added.
    ///
    /// # Errors
    ///
    /// Status and cookie problems are reported before the sink is touched. A sink
    /// that fails to commit the status yields [`ResponseError::Commit`].
    pub fn write(&self, sink: &mut dyn ResponseSink, _req: &RequestHead) -> Result<(), ResponseError> {
        let status = self.status()?;
        let set_cookies = self.render_cookies()?;

        let headers = sink.headers_mut();
        headers.insert(X_CONTENT_TYPE_OPTIONS, NOSNIFF);
        if let Some(own) = &self.headers {
            for (name, value) in own {
                headers.append(name, value.clone());
            }
        }
        for set_cookie in set_cookies {
            headers.append(SET_COOKIE, set_cookie);
        }

        sink.write_status(status).map_err(ResponseError::commit)?;
        trace!(status = %status, "response head committed");
        Ok(())
    }

    fn render_cookies(&self) -> Result<Vec<HeaderValue>, ResponseError> {
        let Some(cookies) = &self.cookies else {
            return Ok(Vec::new());
        };

        cookies
            .iter()
            .map(|cookie| {
                HeaderValue::try_from(cookie.to_string())
                    .map_err(|source| ResponseError::invalid_cookie(cookie.name(), source))
            })
            .collect()
    }
}

impl HttpResponse for HeaderResponse {
    fn write(&mut self, sink: &mut dyn ResponseSink, req: &RequestHead) -> Result<(), ResponseError> {
        HeaderResponse::write(self, sink, req)
    }
}
