use http::header::InvalidHeaderValue;
use std::io;
use thiserror::Error;

/// Error type a raw body writer may return, surfaced to the caller untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("invalid http status code: {code}, expect 0 or a value in 100..=599")]
    InvalidStatusCode { code: u16 },

    #[error("cookie {name} can't be used as a Set-Cookie value: {source}")]
    InvalidCookie {
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("commit response head error: {source}")]
    Commit {
        #[source]
        source: io::Error,
    },

    #[error("failed transferring the input stream: {source}")]
    StreamTransferFailed {
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    WriteBody(BoxError),
}

impl ResponseError {
    pub fn invalid_status_code(code: u16) -> Self {
        Self::InvalidStatusCode { code }
    }

    pub fn invalid_cookie<S: ToString>(name: S, source: InvalidHeaderValue) -> Self {
        Self::InvalidCookie { name: name.to_string(), source }
    }

    pub fn commit<E: Into<io::Error>>(e: E) -> Self {
        Self::Commit { source: e.into() }
    }

    pub fn stream_transfer_failed<E: Into<io::Error>>(e: E) -> Self {
        Self::StreamTransferFailed { source: e.into() }
    }

    pub fn write_body<E: Into<BoxError>>(e: E) -> Self {
        Self::WriteBody(e.into())
    }
}
